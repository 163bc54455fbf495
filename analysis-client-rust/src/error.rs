//! Error types for the analysis client

use thiserror::Error;

/// Result alias used throughout the client
pub type Result<T> = std::result::Result<T, ClientError>;

/// Top-level client error
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the service rejected it
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The asynchronous task never produced a usable terminal state
    #[error(transparent)]
    Poll(#[from] PollError),

    /// Cancelled while the submission itself was still in flight
    #[error("Analysis was cancelled before the service answered")]
    Cancelled,
}

impl ClientError {
    /// True for a cancellation at any stage of a submission
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ClientError::Cancelled | ClientError::Poll(PollError::Cancelled { .. })
        )
    }
}

/// A single request/response exchange failed
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Polling an asynchronous task failed
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Polling task {task_id} failed on attempt {attempt}: {source}")]
    Transport {
        task_id: String,
        attempt: u32,
        #[source]
        source: NetworkError,
    },

    #[error("Task {task_id} failed on the service: {message}")]
    TaskFailed { task_id: String, message: String },

    #[error("Task {task_id} finished without a usable result: {message}")]
    MalformedResult { task_id: String, message: String },

    #[error("Task {task_id} still pending after {attempts} attempts")]
    Exhausted { task_id: String, attempts: u32 },

    #[error("Polling task {task_id} was cancelled")]
    Cancelled { task_id: String },
}

impl PollError {
    pub fn task_id(&self) -> &str {
        match self {
            PollError::Transport { task_id, .. }
            | PollError::TaskFailed { task_id, .. }
            | PollError::MalformedResult { task_id, .. }
            | PollError::Exhausted { task_id, .. }
            | PollError::Cancelled { task_id } => task_id,
        }
    }
}
