//! Keyboard handling

use contract_auditor_sdk::ExportFormat;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, View};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Save dialog captures text input
        if self.save_dialog.is_open() {
            match key.code {
                KeyCode::Char(c) => self.save_dialog.push(c),
                KeyCode::Backspace => self.save_dialog.backspace(),
                KeyCode::Enter => self.confirm_save(),
                KeyCode::Esc => self.close_dialogs(),
                _ => {}
            }
            return;
        }

        if self.info_dialog.is_open() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.close_dialogs(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.next_view(),
            KeyCode::BackTab => self.previous_view(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Enter => self.activate(),
            KeyCode::Char('a') => self.start_analysis(),
            KeyCode::Char('s') => self.open_save_dialog(),
            KeyCode::Char('r') => self.refresh_history(),
            KeyCode::Char('c') => self.compare_selection(),
            KeyCode::Char('x') => {
                self.export_result(ExportFormat::Csv);
            }
            KeyCode::Char('J') => {
                self.export_result(ExportFormat::Json);
            }
            KeyCode::Char('l') => self.toggle_language(),
            KeyCode::Char('d') if self.current_view == View::Snippets => {
                self.delete_selected_snippet()
            }
            KeyCode::Esc => {
                self.cancel_analysis();
            }
            _ => {}
        }
    }
}
