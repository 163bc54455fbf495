//! Messages from background tasks to the UI loop
//!
//! Spawned tasks never touch `App` directly. They send an [`AppCommand`]
//! through the channel and the UI loop applies it between frames.

use contract_auditor_sdk::AnalysisResult;

#[derive(Debug, Clone)]
pub enum AppCommand {
    /// The running analysis produced a result
    AnalysisFinished(AnalysisResult),

    /// The running analysis failed or was cancelled
    AnalysisFailed(String),

    /// A fresh history list arrived
    HistoryLoaded(Vec<AnalysisResult>),

    /// Fetching the history list failed
    HistoryFailed(String),

    /// Show a notification to the user
    ShowNotification {
        level: NotificationLevel,
        title: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}
