//! Async client for the remote smart-contract analysis service
//!
//! The service accepts contract source on `POST /analyze` and either answers
//! with the finished result or with a task id that has to be polled on
//! `GET /result/{task_id}` until it leaves the pending state. This crate
//! wraps that exchange:
//!
//! - [`Transport`] is the seam to the service. [`HttpTransport`] talks HTTP
//!   with an optional bearer token, [`SimulatedTransport`] answers offline
//!   with a canned finding.
//! - [`poll`] drives task polling with an injected [`Clock`], an attempt
//!   ceiling and optional cancellation.
//! - [`AnalysisClient`] ties both together behind `submit`, `history` and
//!   `export_remote`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use analysis_client::{AnalysisClient, HttpTransport};
//! use contract_auditor_sdk::{AnalysisRequest, Language};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new("http://localhost:5000").with_token(Some("secret".into()));
//! let client = AnalysisClient::new(Arc::new(transport));
//!
//! let request = AnalysisRequest::new("contract A {}", Language::Solidity);
//! let result = client.submit(&request).await?;
//! for vulnerability in result.vulnerabilities() {
//!     println!("{}: {}", vulnerability.name, vulnerability.description);
//! }
//! # Ok(())
//! # }
//! ```

/// Debug-level event, compiled out unless `tracing-support` is enabled
macro_rules! client_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing-support")]
        tracing::debug!($($arg)*);
    };
}

/// Warning-level event, compiled out unless `tracing-support` is enabled
macro_rules! client_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing-support")]
        tracing::warn!($($arg)*);
    };
}

pub(crate) use client_debug;
pub(crate) use client_warn;

pub mod client;
pub mod error;
pub mod poll;
pub mod transport;

pub use client::AnalysisClient;
pub use error::{ClientError, NetworkError, PollError, Result};
pub use poll::{Clock, PollPolicy, TokioClock, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use transport::{HttpTransport, SimulatedTransport, Transport, SIMULATED_FINDING};

// Cancellation handle accepted by `AnalysisClient::submit_cancellable`
pub use tokio_util::sync::CancellationToken;
