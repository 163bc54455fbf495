//! Analysis and export operations

use analysis_client::CancellationToken;
use contract_auditor_sdk::{AnalysisRequest, AnalysisResult, ExportFormat};
use std::path::PathBuf;
use std::time::Instant;

use super::{AnalysisStatus, App, AppCommand, NotificationLevel, View};
use crate::context::AuditorContext;
use crate::export::{export, ExportError};

impl App {
    /// Submit the edit state on a background task.
    ///
    /// Only one analysis runs at a time; the result arrives as an
    /// [`AppCommand`].
    pub fn start_analysis(&mut self) {
        if self.analysis.is_running() {
            self.notifications
                .warning("Analysis Running", "Wait for the current analysis to finish");
            return;
        }

        if self.code.trim().is_empty() {
            self.notifications.warning(
                "Nothing to Analyze",
                "Open a contract file or load a saved snippet first",
            );
            return;
        }

        let request = AnalysisRequest::new(self.code.clone(), self.language);
        let client = self.context.client.clone();
        let tx = self.command_tx.clone();
        let cancel = CancellationToken::new();

        self.analysis = AnalysisStatus::Running {
            started: Instant::now(),
        };
        self.analysis_cancel = Some(cancel.clone());
        self.history_loading = true;

        tracing::debug!(language = %self.language, bytes = self.code.len(), "starting analysis");

        self.runtime.spawn(async move {
            match AuditorContext::analyze(&client, &request, &cancel).await {
                Ok(outcome) => {
                    let _ = tx.send(AppCommand::AnalysisFinished(outcome.result));
                    let _ = match outcome.history {
                        Ok(history) => tx.send(AppCommand::HistoryLoaded(history)),
                        Err(message) => tx.send(AppCommand::HistoryFailed(message)),
                    };
                }
                Err(e) => {
                    let (level, title) = if e.is_cancelled() {
                        (NotificationLevel::Info, "Analysis Cancelled")
                    } else {
                        (NotificationLevel::Error, "Analysis Failed")
                    };
                    let _ = tx.send(AppCommand::ShowNotification {
                        level,
                        title: title.to_string(),
                        message: e.to_string(),
                    });
                    let _ = tx.send(AppCommand::AnalysisFailed(e.to_string()));
                }
            }
        });
    }

    /// Stop polling the running analysis
    pub fn cancel_analysis(&mut self) -> bool {
        match self.analysis_cancel.take() {
            Some(cancel) if self.analysis.is_running() => {
                cancel.cancel();
                self.notifications
                    .info("Cancelling", "Stopping the running analysis");
                true
            }
            _ => false,
        }
    }

    pub(crate) fn finish_analysis(&mut self, result: AnalysisResult) {
        let count = result.vulnerabilities().len();
        self.result = Some(result);
        self.result_selected = 0;
        self.analysis = AnalysisStatus::Finished {
            vulnerabilities: count,
        };
        self.analysis_cancel = None;

        if count == 0 {
            self.notifications
                .success("Analysis Complete", "No vulnerabilities reported");
        } else {
            self.notifications.warning(
                "Analysis Complete",
                format!("{} vulnerabilities reported", count),
            );
        }
    }

    /// Previous result stays on screen. The spawned task reports the
    /// failure to the user through [`AppCommand::ShowNotification`].
    pub(crate) fn fail_analysis(&mut self, message: String) {
        tracing::warn!(%message, "analysis failed");
        self.analysis = AnalysisStatus::Failed { message };
        self.analysis_cancel = None;
        self.history_loading = false;
    }

    /// Result the export keys act on: the highlighted history entry in the
    /// History view, the latest analysis everywhere else
    pub fn export_target(&self) -> Option<&AnalysisResult> {
        match self.current_view {
            View::History => self.history.get(self.history_selected),
            _ => self.result.as_ref(),
        }
    }

    /// Write the export file into the configured export directory
    pub fn export_result(&mut self, format: ExportFormat) -> Option<PathBuf> {
        let outcome = export(self.export_target(), format).and_then(|artifact| {
            artifact.write_to(&self.context.config.export_dir)
        });

        match outcome {
            Ok(path) => {
                self.notifications
                    .success("Exported", path.display().to_string());
                Some(path)
            }
            Err(ExportError::NoResult) => {
                self.notifications
                    .warning("Nothing to Export", "Run an analysis first");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, %format, "export failed");
                self.notifications.error("Export Failed", e.to_string());
                None
            }
        }
    }
}
