//! Saving, loading and deleting snippets from the UI

use super::{App, SaveDialog};
use crate::snippets::SnippetStore;

impl App {
    pub fn open_save_dialog(&mut self) {
        if self.code.trim().is_empty() {
            self.notifications
                .warning("Nothing to Save", "There is no contract code loaded");
            return;
        }
        self.save_dialog = SaveDialog::Editing {
            buffer: self.source_label.clone().unwrap_or_default(),
        };
    }

    /// Save under the name typed into the dialog
    pub fn confirm_save(&mut self) {
        let Some(name) = self.save_dialog.buffer().map(str::to_string) else {
            return;
        };

        match self.context.snippets.save(&name, &self.code, self.language) {
            Ok(true) => {
                self.notifications
                    .success("Snippet Saved", name.trim().to_string());
                self.save_dialog = SaveDialog::Closed;
            }
            Ok(false) => {
                // Dialog stays open for a proper name
                self.notifications
                    .warning("Name Required", "Enter a name for the snippet");
            }
            Err(e) => {
                tracing::warn!(error = %e, "saving snippet failed");
                self.notifications.error("Save Failed", e.to_string());
                self.save_dialog = SaveDialog::Closed;
            }
        }
    }

    pub fn load_selected_snippet(&mut self) {
        let Some(snippet) = self.context.snippets.get(self.snippet_selected) else {
            return;
        };

        let name = snippet.name.clone();
        let (code, language) = SnippetStore::load(snippet);
        self.set_source(code, language, Some(name.clone()));
        self.notifications
            .info("Snippet Loaded", format!("{} ({})", name, language));
    }

    pub fn delete_selected_snippet(&mut self) {
        match self.context.snippets.delete(self.snippet_selected) {
            Ok(Some(removed)) => {
                self.snippet_selected = self
                    .snippet_selected
                    .min(self.context.snippets.len().saturating_sub(1));
                self.notifications.info("Snippet Deleted", removed.name);
            }
            Ok(None) => {}
            Err(e) => {
                self.notifications.error("Delete Failed", e.to_string());
            }
        }
    }
}
