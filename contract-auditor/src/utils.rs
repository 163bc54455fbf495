//! Utility functions for paths, source files and logging setup

use anyhow::{Context, Result};
use contract_auditor_sdk::Language;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Default data directory (database and log file)
pub fn default_data_dir() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "contract-auditor", "contract-auditor") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        PathBuf::from(".contract-auditor")
    }
}

/// Where log output goes
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// The TUI owns the terminal, so logs go to a file
    File(PathBuf),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
pub fn init_logging(target: LogTarget, verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
        }
    }

    Ok(())
}

/// Read contract source from a file, or from stdin when `path` is `-`.
///
/// Returns the language implied by the file extension, if any.
pub fn read_source(path: &Path) -> Result<(String, Option<Language>)> {
    if path == Path::new("-") {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read contract source from stdin")?;
        return Ok((code, None));
    }

    let code = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let language = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension);

    Ok((code, language))
}

/// Pick the language: explicit flag, then file extension, then Solidity
pub fn resolve_language(explicit: Option<Language>, detected: Option<Language>) -> Language {
    explicit.or(detected).unwrap_or_default()
}
