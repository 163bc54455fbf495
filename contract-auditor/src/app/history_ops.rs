//! History refresh, selection and comparison

use contract_auditor_sdk::AnalysisResult;

use super::{App, AppCommand, View};

impl App {
    /// Fetch the history list on a background task
    pub fn refresh_history(&mut self) {
        if self.history_loading {
            return;
        }
        self.history_loading = true;

        let client = self.context.client.clone();
        let tx = self.command_tx.clone();

        self.runtime.spawn(async move {
            let cmd = match client.history().await {
                Ok(results) => AppCommand::HistoryLoaded(results),
                Err(e) => AppCommand::HistoryFailed(e.to_string()),
            };
            let _ = tx.send(cmd);
        });
    }

    pub(crate) fn apply_history(&mut self, results: Vec<AnalysisResult>) {
        tracing::debug!(entries = results.len(), "history loaded");
        self.history.replace(results);
        self.history_loading = false;
        self.history_selected = self
            .history_selected
            .min(self.history.len().saturating_sub(1));
        // Positions changed, so an older matrix no longer matches the list
        self.comparison = None;
    }

    pub fn toggle_history_selection(&mut self) {
        let position = self.history_selected;
        if self.history.toggle(position).is_none() {
            self.notifications.info("History Empty", "Press r to refresh");
        }
    }

    /// Compare the selected history entries and switch to the Compare view
    pub fn compare_selection(&mut self) {
        match self.history.compare_selected() {
            Ok(matrix) => {
                self.comparison = Some(matrix);
                self.current_view = View::Compare;
            }
            Err(e) => {
                self.notifications.warning("Cannot Compare", e.to_string());
            }
        }
    }
}
