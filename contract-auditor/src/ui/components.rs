//! Dialog overlays and layout helpers

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{InfoDialog, SaveDialog};

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

pub fn render_info_dialog(f: &mut Frame, area: Rect, dialog: &InfoDialog) {
    let InfoDialog::Open { name, info } = dialog else {
        return;
    };

    let popup_area = centered_rect(70, 70, area);

    let lines = match info {
        Some(info) => vec![
            Line::from(Span::styled(
                info.title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            heading("Description"),
            Line::from(info.description),
            Line::from(""),
            heading("Mitigation"),
            Line::from(info.mitigation),
            Line::from(""),
            heading("Reference"),
            Line::from(Span::styled(info.reference, Style::default().fg(Color::Cyan))),
        ],
        None => vec![
            Line::from(Span::styled(
                name.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("No additional information available for this vulnerability."),
        ],
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Vulnerability Info ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

pub fn render_save_dialog(f: &mut Frame, area: Rect, dialog: &SaveDialog) {
    let Some(buffer) = dialog.buffer() else {
        return;
    };

    let popup_area = centered_rect(50, 20, area);

    let text = vec![
        Line::from("Snippet name:"),
        Line::from(vec![
            Span::styled(buffer, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Save Snippet ")
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
