//! Main application state

use analysis_client::CancellationToken;
use contract_auditor_sdk::{AnalysisResult, Language};
use tokio::sync::mpsc;

use super::{AnalysisStatus, InfoDialog, SaveDialog, View};
use crate::app::{AppCommand, NotificationManager};
use crate::compare::ComparisonMatrix;
use crate::context::AuditorContext;
use crate::history::HistorySelection;

/// Main application state
pub struct App {
    pub context: AuditorContext,

    pub current_view: View,
    pub should_quit: bool,

    // Edit state submitted by `a`
    pub code: String,
    pub language: Language,
    /// File or snippet the code came from
    pub source_label: Option<String>,

    // Results view
    pub result: Option<AnalysisResult>,
    pub result_selected: usize,
    pub analysis: AnalysisStatus,
    pub analysis_cancel: Option<CancellationToken>,

    // Snippets view
    pub snippet_selected: usize,

    // History and compare views
    pub history: HistorySelection,
    pub history_selected: usize,
    pub history_loading: bool,
    pub comparison: Option<ComparisonMatrix>,

    // Dialogs
    pub info_dialog: InfoDialog,
    pub save_dialog: SaveDialog,

    pub notifications: NotificationManager,

    // Background task plumbing
    pub command_tx: mpsc::UnboundedSender<AppCommand>,
    pub(crate) command_rx: mpsc::UnboundedReceiver<AppCommand>,
    pub runtime: tokio::runtime::Handle,
}
