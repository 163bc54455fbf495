//! Task polling
//!
//! After `POST /analyze` hands out a task id, the result endpoint is queried
//! once per interval until the task leaves the pending state. The loop is a
//! plain future:
//!
//! - the wait between polls goes through a [`Clock`], so tests can drive it
//!   without real time passing;
//! - polls are sequential, the next wait starts only after the previous
//!   response arrived, so ticks never overlap;
//! - [`PollPolicy::max_attempts`] bounds the loop;
//! - a [`CancellationToken`] stops it between or during polls.
//!
//! A transport failure on any poll ends the loop immediately. There is no
//! retry.

use async_trait::async_trait;
use contract_auditor_sdk::{AnalysisResult, AnalysisTask, TaskState, TaskStatusResponse};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::PollError;
use crate::transport::Transport;

/// Wait between two polls of the same task
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Polls before giving up (five minutes at the default interval)
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 150;

/// Source of the delay between polls
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real timers from the tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How often and how long to poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

/// Poll `task` until it reaches a terminal state.
///
/// Each attempt first waits one interval, then queries the task once.
/// Returns the decoded payload of a done task.
pub async fn poll_until_terminal(
    transport: &dyn Transport,
    clock: &dyn Clock,
    policy: &PollPolicy,
    task: &AnalysisTask,
    cancel: Option<&CancellationToken>,
) -> Result<AnalysisResult, PollError> {
    let task_id = task.task_id.as_str();
    let mut attempt: u32 = 0;

    while attempt < policy.max_attempts {
        attempt += 1;

        let tick = async {
            clock.sleep(policy.interval).await;
            transport.task_status(task_id).await
        };

        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    crate::client_debug!(task_id, attempt, "polling cancelled");
                    return Err(PollError::Cancelled { task_id: task_id.to_string() });
                }
                outcome = tick => outcome,
            },
            None => tick.await,
        };

        let status = outcome.map_err(|source| {
            crate::client_warn!(task_id, attempt, error = %source, "poll failed");
            PollError::Transport {
                task_id: task_id.to_string(),
                attempt,
                source,
            }
        })?;

        match status.task_state() {
            TaskState::Pending => {
                crate::client_debug!(task_id, attempt, "task still pending");
            }
            TaskState::Done => {
                crate::client_debug!(task_id, attempt, state = %status.state, "task finished");
                return decode_result(task_id, status);
            }
            TaskState::Error => {
                return Err(PollError::TaskFailed {
                    task_id: task_id.to_string(),
                    message: failure_message(&status),
                });
            }
        }
    }

    Err(PollError::Exhausted {
        task_id: task_id.to_string(),
        attempts: attempt,
    })
}

fn decode_result(task_id: &str, status: TaskStatusResponse) -> Result<AnalysisResult, PollError> {
    let payload = status.result.ok_or_else(|| PollError::MalformedResult {
        task_id: task_id.to_string(),
        message: format!("state {} carried no result", status.state),
    })?;

    serde_json::from_value(payload).map_err(|e| PollError::MalformedResult {
        task_id: task_id.to_string(),
        message: e.to_string(),
    })
}

fn failure_message(status: &TaskStatusResponse) -> String {
    match &status.result {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => status.state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(2));
        assert_eq!(policy.max_attempts, 150);
    }

    #[test]
    fn test_failure_message_prefers_payload_text() {
        let status = TaskStatusResponse {
            state: "FAILURE".to_string(),
            result: Some(json!("compiler crashed")),
        };
        assert_eq!(failure_message(&status), "compiler crashed");

        let bare = TaskStatusResponse {
            state: "FAILURE".to_string(),
            result: None,
        };
        assert_eq!(failure_message(&bare), "FAILURE");
    }

    #[test]
    fn test_decode_result_requires_payload() {
        let status = TaskStatusResponse {
            state: "SUCCESS".to_string(),
            result: None,
        };
        let err = decode_result("t1", status).unwrap_err();
        assert!(matches!(err, PollError::MalformedResult { .. }));
    }
}
