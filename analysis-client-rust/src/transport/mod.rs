//! Transport layer between the client and the analysis service
//!
//! Every operation is a single request/response exchange. Retrying, polling
//! and error conversion happen above this layer.

use async_trait::async_trait;
use contract_auditor_sdk::{
    AnalysisRequest, AnalysisResult, AnalyzeResponse, ExportFormat, TaskStatusResponse,
};

use crate::error::NetworkError;

mod http;
mod simulated;

pub use http::HttpTransport;
pub use simulated::{SimulatedTransport, DEFAULT_SIMULATED_DELAY, SIMULATED_FINDING};

/// One round trip per method; implementations must not retry
#[async_trait]
pub trait Transport: Send + Sync {
    /// `POST /analyze`
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalyzeResponse, NetworkError>;

    /// `GET /result/{task_id}`
    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse, NetworkError>;

    /// `GET /history`
    async fn history(&self) -> Result<Vec<AnalysisResult>, NetworkError>;

    /// `POST /export/{format}`; the body is the result, the response a binary blob
    async fn export(
        &self,
        format: ExportFormat,
        result: &AnalysisResult,
    ) -> Result<Vec<u8>, NetworkError>;

    /// The client stopped polling `task_id` (cancelled or out of attempts).
    /// Transports that track tasks locally release them here.
    async fn abandon(&self, _task_id: &str) {}
}
