//! Wiring shared by the CLI and the terminal UI
//!
//! [`AuditorContext`] owns the configured analysis client, the storage backend
//! and the snippet store. It is also the workflow boundary: errors from the
//! lower layers surface here as typed values and become notifications or
//! exit messages in the front ends.

use analysis_client::{
    AnalysisClient, CancellationToken, ClientError, HttpTransport, SimulatedTransport, Transport,
};
use anyhow::{Context, Result};
use contract_auditor_sdk::{AnalysisRequest, AnalysisResult};
use std::sync::Arc;
use tracing::Instrument;

use crate::auth::{effective_token, TokenSource};
use crate::config::Config;
use crate::snippets::SnippetStore;
use crate::storage::{MemoryStorage, SqliteStorage, Storage};

/// Result of a finished analysis plus the refreshed history
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// `Err` carries the message of a failed history refresh
    pub history: std::result::Result<Vec<AnalysisResult>, String>,
}

pub struct AuditorContext {
    pub config: Config,
    pub client: AnalysisClient,
    pub storage: Arc<dyn Storage>,
    pub snippets: SnippetStore,
    pub token_source: Option<TokenSource>,
    /// Problems found while starting up, for the front end to report
    pub startup_warnings: Vec<String>,
}

impl AuditorContext {
    /// Open storage and build the client from configuration
    pub fn new(config: Config) -> Result<Self> {
        let storage: Arc<dyn Storage> = if config.ephemeral {
            Arc::new(MemoryStorage::new())
        } else {
            let path = config.database_path();
            Arc::new(
                SqliteStorage::open(path.clone())
                    .with_context(|| format!("Failed to open storage at {}", path.display()))?,
            )
        };

        let token = effective_token(config.api_token.as_deref(), storage.as_ref())
            .context("Failed to read stored token")?;
        let token_source = token.as_ref().map(|(_, source)| *source);

        let transport: Arc<dyn Transport> = if config.offline {
            tracing::info!("using simulated analysis service");
            Arc::new(SimulatedTransport::new())
        } else {
            let mut http =
                HttpTransport::new(config.api_url.clone()).with_token(token.map(|(t, _)| t));
            if let Some(timeout) = config.request_timeout {
                http = http.with_timeout(timeout);
            }
            Arc::new(http)
        };

        let mut context = Self::with_parts(config, storage, transport);
        context.token_source = token_source;
        Ok(context)
    }

    /// Assemble a context from explicit parts
    pub fn with_parts(
        config: Config,
        storage: Arc<dyn Storage>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let client = AnalysisClient::new(transport).with_poll_policy(config.poll_policy());
        let (snippets, error) = SnippetStore::open_or_default(storage.clone());

        let startup_warnings = error
            .map(|e| vec![format!("{}. Starting with no saved snippets.", e)])
            .unwrap_or_default();

        Self {
            config,
            client,
            storage,
            snippets,
            token_source: None,
            startup_warnings,
        }
    }

    /// Run an analysis, then refresh the history list.
    ///
    /// A failed history refresh does not fail the analysis. Polling stops
    /// with `PollError::Cancelled` once `cancel` fires.
    pub async fn analyze(
        client: &AnalysisClient,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
    ) -> std::result::Result<AnalysisOutcome, ClientError> {
        let span = tracing::info_span!("analysis", language = %request.language);

        async {
            let result = client.submit_cancellable(request, cancel).await?;
            tracing::info!(
                vulnerabilities = result.vulnerabilities().len(),
                "analysis finished"
            );

            let history = match client.history().await {
                Ok(history) => Ok(history),
                Err(e) => {
                    tracing::warn!(error = %e, "history refresh after analysis failed");
                    Err(e.to_string())
                }
            };

            Ok::<_, ClientError>(AnalysisOutcome { result, history })
        }
        .instrument(span)
        .await
    }

    pub async fn history(&self) -> std::result::Result<Vec<AnalysisResult>, ClientError> {
        self.client.history().await
    }
}
