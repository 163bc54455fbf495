//! Offline stand-in for the analysis service
//!
//! Answers every submission after a fixed delay with one hard-coded finding.
//! Optionally it behaves like the asynchronous service: `analyze` hands out a
//! task id which stays pending for a configured number of polls.

use async_trait::async_trait;
use chrono::Utc;
use contract_auditor_sdk::{
    AnalysisRequest, AnalysisResult, AnalyzeResponse, ExportFormat, ResultId, TaskStatusResponse,
    Vulnerability,
};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::Transport;
use crate::error::NetworkError;

/// Finding reported for every simulated analysis
pub const SIMULATED_FINDING: &str = "Potential Reentrancy";

/// Delay before a simulated analysis answers
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_secs(2);

struct PendingTask {
    remaining_polls: u32,
    result: AnalysisResult,
}

#[derive(Default)]
struct SimulatedState {
    tasks: HashMap<String, PendingTask>,
    /// Newest first, like the service's history endpoint
    history: Vec<AnalysisResult>,
}

pub struct SimulatedTransport {
    delay: Duration,
    pending_polls: Option<u32>,
    state: Mutex<SimulatedState>,
}

impl SimulatedTransport {
    /// Synchronous simulation: `analyze` returns the finished result
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_SIMULATED_DELAY,
            pending_polls: None,
            state: Mutex::new(SimulatedState::default()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answer with a task id that reports `PENDING` for `polls` polls
    pub fn with_pending_polls(mut self, polls: u32) -> Self {
        self.pending_polls = Some(polls);
        self
    }

    #[cfg(test)]
    pub(crate) async fn pending_tasks(&self) -> usize {
        self.state.lock().await.tasks.len()
    }

    fn build_result(request: &AnalysisRequest) -> AnalysisResult {
        AnalysisResult::new(vec![Vulnerability::new(
            SIMULATED_FINDING,
            format!(
                "Simulated analysis of {} source: an external call is made before state is updated.",
                request.language
            ),
        )])
        .with_id(ResultId::Text(Uuid::new_v4().to_string()))
        .with_created_at(Utc::now())
        .with_contract_code(request.code.clone())
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalyzeResponse, NetworkError> {
        tokio::time::sleep(self.delay).await;

        let result = Self::build_result(request);
        let mut state = self.state.lock().await;

        match self.pending_polls {
            Some(remaining_polls) => {
                let task_id = Uuid::new_v4().to_string();
                state.tasks.insert(
                    task_id.clone(),
                    PendingTask {
                        remaining_polls,
                        result,
                    },
                );
                Ok(AnalyzeResponse::Task { task_id })
            }
            None => {
                state.history.insert(0, result.clone());
                Ok(AnalyzeResponse::Completed(result))
            }
        }
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse, NetworkError> {
        let mut state = self.state.lock().await;

        let finished = match state.tasks.get_mut(task_id) {
            None => {
                return Err(NetworkError::Status {
                    url: format!("simulated://result/{}", task_id),
                    status: 404,
                    body: "unknown task".to_string(),
                })
            }
            Some(task) if task.remaining_polls > 0 => {
                task.remaining_polls -= 1;
                false
            }
            Some(_) => true,
        };

        if !finished {
            return Ok(TaskStatusResponse {
                state: "PENDING".to_string(),
                result: None,
            });
        }

        let task = state.tasks.remove(task_id).ok_or_else(|| {
            NetworkError::Unavailable(format!("task {} disappeared", task_id))
        })?;
        state.history.insert(0, task.result.clone());

        let payload = serde_json::to_value(&task.result).map_err(|e| NetworkError::Decode {
            url: format!("simulated://result/{}", task_id),
            message: e.to_string(),
        })?;

        Ok(TaskStatusResponse {
            state: "SUCCESS".to_string(),
            result: Some(payload),
        })
    }

    async fn history(&self) -> Result<Vec<AnalysisResult>, NetworkError> {
        Ok(self.state.lock().await.history.clone())
    }

    async fn abandon(&self, task_id: &str) {
        self.state.lock().await.tasks.remove(task_id);
    }

    async fn export(
        &self,
        format: ExportFormat,
        _result: &AnalysisResult,
    ) -> Result<Vec<u8>, NetworkError> {
        Err(NetworkError::Unavailable(format!(
            "remote {} export needs a running analysis service",
            format
        )))
    }
}
