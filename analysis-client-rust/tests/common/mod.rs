//! Common test doubles for client tests

#![allow(dead_code)]

use analysis_client::{CancellationToken, Clock, NetworkError, Transport};
use async_trait::async_trait;
use contract_auditor_sdk::{
    AnalysisRequest, AnalysisResult, AnalyzeResponse, ExportFormat, TaskStatusResponse,
    Vulnerability,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Clock that records requested sleeps and returns immediately
#[derive(Default)]
pub struct InstantClock {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl InstantClock {
    pub fn sleep_count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        tokio::task::yield_now().await;
    }
}

/// Clock that fires a cancellation token on its `cancel_on`-th sleep
pub struct CancellingClock {
    pub token: CancellationToken,
    pub cancel_on: usize,
    pub sleeps: AtomicUsize,
}

impl CancellingClock {
    pub fn new(token: CancellationToken, cancel_on: usize) -> Self {
        Self {
            token,
            cancel_on,
            sleeps: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Clock for CancellingClock {
    async fn sleep(&self, _duration: Duration) {
        let count = self.sleeps.fetch_add(1, Ordering::SeqCst) + 1;
        if count == self.cancel_on {
            self.token.cancel();
        }
        tokio::task::yield_now().await;
    }
}

/// Service that accepts the connection and never answers
pub struct HungTransport;

#[async_trait]
impl Transport for HungTransport {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalyzeResponse, NetworkError> {
        std::future::pending().await
    }

    async fn task_status(&self, _task_id: &str) -> Result<TaskStatusResponse, NetworkError> {
        std::future::pending().await
    }

    async fn history(&self) -> Result<Vec<AnalysisResult>, NetworkError> {
        std::future::pending().await
    }

    async fn export(
        &self,
        _format: ExportFormat,
        _result: &AnalysisResult,
    ) -> Result<Vec<u8>, NetworkError> {
        std::future::pending().await
    }
}

/// Transport answering from pre-scripted queues
pub struct ScriptedTransport {
    pub analyze_response: Mutex<Option<Result<AnalyzeResponse, NetworkError>>>,
    pub statuses: Mutex<VecDeque<Result<TaskStatusResponse, NetworkError>>>,
    pub status_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub abandoned: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(analyze_response: Result<AnalyzeResponse, NetworkError>) -> Self {
        Self {
            analyze_response: Mutex::new(Some(analyze_response)),
            statuses: Mutex::new(VecDeque::new()),
            status_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            abandoned: Mutex::new(Vec::new()),
        }
    }

    pub fn task(task_id: &str) -> Self {
        Self::new(Ok(AnalyzeResponse::Task {
            task_id: task_id.to_string(),
        }))
    }

    pub fn then_status(self, status: Result<TaskStatusResponse, NetworkError>) -> Self {
        self.statuses.lock().unwrap().push_back(status);
        self
    }

    pub fn then_pending(self) -> Self {
        self.then_status(Ok(pending()))
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn abandoned(&self) -> Vec<String> {
        self.abandoned.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalyzeResponse, NetworkError> {
        self.analyze_response
            .lock()
            .unwrap()
            .take()
            .expect("analyze called more than once")
    }

    async fn task_status(&self, _task_id: &str) -> Result<TaskStatusResponse, NetworkError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        // Once the script runs out the task simply stays pending
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(pending()))
    }

    async fn history(&self) -> Result<Vec<AnalysisResult>, NetworkError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![sample_result()])
    }

    async fn export(
        &self,
        _format: ExportFormat,
        _result: &AnalysisResult,
    ) -> Result<Vec<u8>, NetworkError> {
        Ok(b"exported".to_vec())
    }

    async fn abandon(&self, task_id: &str) {
        self.abandoned.lock().unwrap().push(task_id.to_string());
    }
}

pub fn pending() -> TaskStatusResponse {
    TaskStatusResponse {
        state: "PENDING".to_string(),
        result: None,
    }
}

pub fn done_with(result: &AnalysisResult) -> TaskStatusResponse {
    TaskStatusResponse {
        state: "DONE".to_string(),
        result: Some(serde_json::to_value(result).unwrap()),
    }
}

pub fn sample_result() -> AnalysisResult {
    AnalysisResult::new(vec![
        Vulnerability::new("Use of tx.origin", "Function withdraw uses tx.origin"),
        Vulnerability::new("Unchecked External Call", "Function pay makes an unchecked call"),
    ])
}

pub fn result_json() -> serde_json::Value {
    json!({
        "vulnerabilities": [
            {"name": "Use of tx.origin", "description": "Function withdraw uses tx.origin"},
            {"name": "Unchecked External Call", "description": "Function pay makes an unchecked call"}
        ]
    })
}

pub fn unavailable() -> NetworkError {
    NetworkError::Unavailable("connection reset".to_string())
}
