//! Runtime configuration from the environment and command-line overrides

use analysis_client::{PollPolicy, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

pub const ENV_API_URL: &str = "AUDITOR_API_URL";
pub const ENV_API_TOKEN: &str = "AUDITOR_API_TOKEN";
pub const ENV_POLL_INTERVAL_MS: &str = "AUDITOR_POLL_INTERVAL_MS";
pub const ENV_MAX_POLL_ATTEMPTS: &str = "AUDITOR_MAX_POLL_ATTEMPTS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "AUDITOR_REQUEST_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "AUDITOR_DATA_DIR";
pub const ENV_EXPORT_DIR: &str = "AUDITOR_EXPORT_DIR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Token from the environment; the stored token is consulted later
    pub api_token: Option<String>,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub request_timeout: Option<Duration>,
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    /// Use the simulated service instead of HTTP
    pub offline: bool,
    /// Keep snippets and the token in memory only
    pub ephemeral: bool,
}

impl Config {
    /// Read configuration from process environment variables.
    /// Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let poll_interval = match var(ENV_POLL_INTERVAL_MS) {
            Some(raw) => Duration::from_millis(parse_positive(ENV_POLL_INTERVAL_MS, &raw)?),
            None => DEFAULT_POLL_INTERVAL,
        };

        let max_poll_attempts = match var(ENV_MAX_POLL_ATTEMPTS) {
            Some(raw) => u32::try_from(parse_positive(ENV_MAX_POLL_ATTEMPTS, &raw)?).map_err(
                |_| ConfigError::InvalidNumber {
                    name: ENV_MAX_POLL_ATTEMPTS,
                    value: raw.clone(),
                },
            )?,
            None => DEFAULT_MAX_POLL_ATTEMPTS,
        };

        let request_timeout = var(ENV_REQUEST_TIMEOUT_SECS)
            .map(|raw| parse_positive(ENV_REQUEST_TIMEOUT_SECS, &raw).map(Duration::from_secs))
            .transpose()?;

        Ok(Self {
            api_url: var(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: var(ENV_API_TOKEN),
            poll_interval,
            max_poll_attempts,
            request_timeout,
            data_dir: var(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(crate::utils::default_data_dir),
            export_dir: var(ENV_EXPORT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            offline: false,
            ephemeral: false,
        })
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval,
            max_attempts: self.max_poll_attempts,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("contract-auditor.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("contract-auditor.log")
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
        }),
    }
}
