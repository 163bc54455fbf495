//! Shared fixtures for contract-auditor integration tests

#![allow(dead_code)]

use analysis_client::{NetworkError, SimulatedTransport, Transport};
use async_trait::async_trait;
use contract_auditor::app::App;
use contract_auditor::config::Config;
use contract_auditor::context::AuditorContext;
use contract_auditor::storage::{MemoryStorage, Storage};
use contract_auditor_sdk::{
    AnalysisRequest, AnalysisResult, AnalyzeResponse, ExportFormat, TaskStatusResponse,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::from_lookup(|_| None).unwrap();
    config.data_dir = dir.join("data");
    config.export_dir = dir.join("exports");
    config.poll_interval = Duration::from_millis(1);
    config
}

/// Simulated service that answers immediately
pub fn instant_service() -> Arc<dyn Transport> {
    Arc::new(SimulatedTransport::new().with_delay(Duration::ZERO))
}

/// Service whose every call fails
pub struct DownService;

#[async_trait]
impl Transport for DownService {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalyzeResponse, NetworkError> {
        Err(NetworkError::Unavailable("connection refused".to_string()))
    }

    async fn task_status(&self, _task_id: &str) -> Result<TaskStatusResponse, NetworkError> {
        Err(NetworkError::Unavailable("connection refused".to_string()))
    }

    async fn history(&self) -> Result<Vec<AnalysisResult>, NetworkError> {
        Err(NetworkError::Unavailable("connection refused".to_string()))
    }

    async fn export(
        &self,
        _format: ExportFormat,
        _result: &AnalysisResult,
    ) -> Result<Vec<u8>, NetworkError> {
        Err(NetworkError::Unavailable("connection refused".to_string()))
    }
}

/// Service that never answers
pub struct HungService;

#[async_trait]
impl Transport for HungService {
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

pub fn context_with(
    dir: &Path,
    storage: Arc<dyn Storage>,
    transport: Arc<dyn Transport>,
) -> AuditorContext {
    AuditorContext::with_parts(test_config(dir), storage, transport)
}

pub fn app_with(
    runtime: &tokio::runtime::Runtime,
    dir: &Path,
    transport: Arc<dyn Transport>,
) -> App {
    let context = context_with(dir, Arc::new(MemoryStorage::new()), transport);
    App::new(context, runtime.handle().clone())
}

/// Block until the next background command arrives and apply it
pub fn apply_next(runtime: &tokio::runtime::Runtime, app: &mut App) {
    let cmd = runtime
        .block_on(async {
            tokio::time::timeout(Duration::from_secs(5), app.next_command()).await
        })
        .expect("timed out waiting for a background command")
        .expect("command channel closed");
    app.handle_command(cmd);
}
