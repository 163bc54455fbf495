//! Rendering for the contract auditor TUI

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, View};

mod components;
mod header_footer;
mod notifications;
mod views;

pub use components::{centered_rect, render_info_dialog, render_save_dialog};
pub use header_footer::{render_footer, render_header};
pub use notifications::render_notifications;
pub use views::{render_compare, render_history, render_results, render_snippets};

/// Draw one frame
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    match app.current_view {
        View::Results => render_results(f, chunks[1], app),
        View::Snippets => render_snippets(f, chunks[1], app),
        View::History => render_history(f, chunks[1], app),
        View::Compare => render_compare(f, chunks[1], app),
    }

    render_footer(f, chunks[2], app);

    // Overlays
    if app.info_dialog.is_open() {
        render_info_dialog(f, f.area(), &app.info_dialog);
    }
    if app.save_dialog.is_open() {
        render_save_dialog(f, f.area(), &app.save_dialog);
    }

    render_notifications(f, app, chunks[1]);
}
