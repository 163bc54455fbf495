//! Header (view tabs, analysis status) and footer (key hints)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{AnalysisStatus, App, View};

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(44)])
        .split(area);

    let titles: Vec<Line> = View::ALL
        .iter()
        .map(|view| Line::from(view.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Contract Auditor "),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let language = Span::styled(
        format!("[{}] ", app.language),
        Style::default().fg(Color::Cyan),
    );
    let status = match &app.analysis {
        AnalysisStatus::Idle => Span::styled("Idle", Style::default().fg(Color::Gray)),
        AnalysisStatus::Running { started } => Span::styled(
            format!("Analyzing... {}s", started.elapsed().as_secs()),
            Style::default().fg(Color::Yellow),
        ),
        AnalysisStatus::Finished { vulnerabilities } => Span::styled(
            format!("Done: {} found", vulnerabilities),
            Style::default().fg(Color::Green),
        ),
        AnalysisStatus::Failed { .. } => Span::styled(
            "Failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let status = Paragraph::new(Line::from(vec![language, status]))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);
}

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
}

/// Key labels exactly as they are typed, paired with what they do
pub fn key_hints(view: View, analysis_running: bool) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("[Tab]", "View"), ("[↑↓/jk]", "Move")];
    match view {
        View::Results => hints.extend([
            ("[Enter]", "Info"),
            ("[a]", "Analyze"),
            ("[l]", "Language"),
            ("[s]", "Save"),
            ("[x]", "CSV"),
            ("[J]", "JSON"),
        ]),
        View::Snippets => hints.extend([("[Enter]", "Load"), ("[d]", "Delete")]),
        View::History => hints.extend([
            ("[Enter]", "Select"),
            ("[c]", "Compare"),
            ("[r]", "Refresh"),
            ("[x]", "CSV"),
            ("[J]", "JSON"),
        ]),
        View::Compare => hints.push(("[r]", "Refresh history")),
    }
    if analysis_running {
        hints.push(("[Esc]", "Cancel"));
    }
    hints.push(("[q]", "Quit"));
    hints
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer_text = if app.save_dialog.is_open() {
        Line::from(vec![
            Span::styled(
                "TYPE",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" snippet name  "),
            key("[Enter]"),
            Span::raw(" Save  "),
            key("[Esc]"),
            Span::raw(" Cancel"),
        ])
    } else if app.info_dialog.is_open() {
        Line::from(vec![key("[Esc/Enter]"), Span::raw(" Close")])
    } else {
        let mut spans = Vec::new();
        for (label, action) in key_hints(app.current_view, app.analysis.is_running()) {
            spans.push(key(label));
            spans.push(Span::raw(format!(" {}  ", action)));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
