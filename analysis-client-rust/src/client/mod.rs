//! AnalysisClient: submission, polling, history and remote export
//!
//! The client owns a [`Transport`] and a [`Clock`] behind `Arc`s, so it is
//! cheap to clone into spawned tasks.
//!
//! # Example: cancelling a long analysis
//!
//! ```no_run
//! use std::sync::Arc;
//! use analysis_client::{AnalysisClient, CancellationToken, SimulatedTransport};
//! use contract_auditor_sdk::{AnalysisRequest, Language};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnalysisClient::new(Arc::new(SimulatedTransport::new().with_pending_polls(10)));
//! let cancel = CancellationToken::new();
//!
//! let token = cancel.clone();
//! tokio::spawn(async move {
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     token.cancel();
//! });
//!
//! let request = AnalysisRequest::new("contract A {}", Language::Solidity);
//! let outcome = client.submit_cancellable(&request, &cancel).await;
//! assert!(outcome.is_err());
//! # Ok(())
//! # }
//! ```

use contract_auditor_sdk::{
    AnalysisRequest, AnalysisResult, AnalysisTask, AnalyzeResponse, ExportFormat,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, PollError, Result};
use crate::poll::{poll_until_terminal, Clock, PollPolicy, TokioClock};
use crate::transport::Transport;

/// Client for the remote analysis service
#[derive(Clone)]
pub struct AnalysisClient {
    /// Transport layer
    transport: Arc<dyn Transport>,
    /// Timer used between polls
    clock: Arc<dyn Clock>,
    /// Poll interval and ceiling
    policy: PollPolicy,
}

impl AnalysisClient {
    /// Create a client with tokio timers and the default poll policy
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            clock: Arc::new(TokioClock),
            policy: PollPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn poll_policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Submit contract source and wait for the finished result.
    ///
    /// # Errors
    /// `ClientError::Network` if the submission itself fails,
    /// `ClientError::Poll` if the task never yields a usable result.
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        self.submit_inner(request, None).await
    }

    /// Like [`submit`](Self::submit), but gives up as soon as `cancel` fires:
    /// during the submission request (`ClientError::Cancelled`) or while
    /// polling (`PollError::Cancelled`).
    pub async fn submit_cancellable(
        &self,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        self.submit_inner(request, Some(cancel)).await
    }

    async fn submit_inner(
        &self,
        request: &AnalysisRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<AnalysisResult> {
        let submission = self.transport.analyze(request);
        let response = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    crate::client_debug!("submission cancelled");
                    return Err(ClientError::Cancelled);
                }
                response = submission => response?,
            },
            None => submission.await?,
        };

        match response {
            AnalyzeResponse::Completed(result) => {
                crate::client_debug!(
                    vulnerabilities = result.vulnerabilities().len(),
                    "analysis finished synchronously"
                );
                Ok(result)
            }
            AnalyzeResponse::Task { task_id } => {
                crate::client_debug!(%task_id, "analysis queued, polling for result");
                let task = AnalysisTask::pending(task_id);
                let outcome = poll_until_terminal(
                    self.transport.as_ref(),
                    self.clock.as_ref(),
                    &self.policy,
                    &task,
                    cancel,
                )
                .await;

                if let Err(PollError::Cancelled { .. } | PollError::Exhausted { .. }) = &outcome {
                    self.transport.abandon(&task.task_id).await;
                }
                Ok(outcome?)
            }
        }
    }

    /// Fetch previously completed analyses
    pub async fn history(&self) -> Result<Vec<AnalysisResult>> {
        Ok(self.transport.history().await?)
    }

    /// Let the service render the export file
    pub async fn export_remote(
        &self,
        result: &AnalysisResult,
        format: ExportFormat,
    ) -> Result<Vec<u8>> {
        Ok(self.transport.export(format, result).await?)
    }
}
