//! Navigation between and within views

use super::{App, InfoDialog, View};

impl App {
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    pub fn previous_view(&mut self) {
        self.current_view = self.current_view.previous();
    }

    /// Number of selectable rows in the current view
    fn row_count(&self) -> usize {
        match self.current_view {
            View::Results => self
                .result
                .as_ref()
                .map(|r| r.vulnerabilities().len())
                .unwrap_or(0),
            View::Snippets => self.context.snippets.len(),
            View::History => self.history.len(),
            View::Compare => 0,
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut usize> {
        match self.current_view {
            View::Results => Some(&mut self.result_selected),
            View::Snippets => Some(&mut self.snippet_selected),
            View::History => Some(&mut self.history_selected),
            View::Compare => None,
        }
    }

    pub fn next(&mut self) {
        let count = self.row_count();
        if let Some(cursor) = self.cursor_mut() {
            if count > 0 {
                *cursor = (*cursor + 1).min(count - 1);
            }
        }
    }

    pub fn previous(&mut self) {
        if let Some(cursor) = self.cursor_mut() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// `Enter`: info in Results, load in Snippets, toggle in History
    pub fn activate(&mut self) {
        match self.current_view {
            View::Results => self.open_info(),
            View::Snippets => self.load_selected_snippet(),
            View::History => self.toggle_history_selection(),
            View::Compare => {}
        }
    }

    pub fn open_info(&mut self) {
        let name = self
            .result
            .as_ref()
            .and_then(|r| r.vulnerabilities().get(self.result_selected))
            .map(|v| v.name.clone());

        if let Some(name) = name {
            self.info_dialog = InfoDialog::open(name);
        }
    }
}
