//! Terminal UI application state
//!
//! The `App` struct lives in [`models`]; behavior is split by concern into
//! the submodules below, each adding an `impl App` block.

use contract_auditor_sdk::Language;
use tokio::sync::mpsc;

use crate::context::AuditorContext;
use crate::history::HistorySelection;

mod commands;
mod models;
mod notifications;

pub use commands::{AppCommand, NotificationLevel};
pub use models::*;
pub use notifications::{Notification, NotificationManager};

mod analysis_ops;
mod command_handlers;
mod history_ops;
mod input;
mod navigation;
mod snippet_ops;

impl App {
    pub fn new(context: AuditorContext, runtime: tokio::runtime::Handle) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let mut notifications = NotificationManager::new();
        for warning in &context.startup_warnings {
            notifications.warning("Startup", warning.clone());
        }

        Self {
            context,
            current_view: View::Results,
            should_quit: false,
            code: String::new(),
            language: Language::default(),
            source_label: None,
            result: None,
            result_selected: 0,
            analysis: AnalysisStatus::Idle,
            analysis_cancel: None,
            snippet_selected: 0,
            history: HistorySelection::default(),
            history_selected: 0,
            history_loading: false,
            comparison: None,
            info_dialog: InfoDialog::Closed,
            save_dialog: SaveDialog::Closed,
            notifications,
            command_tx,
            command_rx,
            runtime,
        }
    }

    /// Set the code that `a` submits
    pub fn set_source(&mut self, code: String, language: Language, label: Option<String>) {
        self.code = code;
        self.language = language;
        self.source_label = label;
    }

    pub fn toggle_language(&mut self) {
        self.language = match self.language {
            Language::Solidity => Language::Vyper,
            Language::Vyper => Language::Solidity,
        };
    }

    /// True while any dialog captures the keyboard
    pub fn dialog_open(&self) -> bool {
        self.info_dialog.is_open() || self.save_dialog.is_open()
    }

    /// Close whichever dialog is open
    pub fn close_dialogs(&mut self) {
        self.info_dialog = InfoDialog::Closed;
        self.save_dialog = SaveDialog::Closed;
    }
}
