//! Applying background task messages to the app state

use super::{App, AppCommand};

impl App {
    /// Process a single command
    pub fn handle_command(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::AnalysisFinished(result) => self.finish_analysis(result),

            AppCommand::AnalysisFailed(message) => self.fail_analysis(message),

            AppCommand::HistoryLoaded(results) => self.apply_history(results),

            AppCommand::HistoryFailed(message) => {
                self.history_loading = false;
                self.notifications.error("History Unavailable", message);
            }

            AppCommand::ShowNotification {
                level,
                title,
                message,
            } => {
                self.notifications.push(level, title, message);
            }
        }
    }

    /// Apply every queued command without blocking. Returns how many ran.
    pub fn drain_commands(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(cmd) = self.command_rx.try_recv() {
            self.handle_command(cmd);
            handled += 1;
        }
        handled
    }

    /// Wait for the next command; `None` once every sender is gone
    pub async fn next_command(&mut self) -> Option<AppCommand> {
        self.command_rx.recv().await
    }
}
