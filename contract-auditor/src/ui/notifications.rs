//! Notification overlay

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, NotificationLevel};

const MAX_VISIBLE: usize = 3;

/// Newest notifications stacked at the bottom of `area`
pub fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    let active = app.notifications.active();
    if active.is_empty() {
        return;
    }

    let shown: Vec<_> = active.iter().rev().take(MAX_VISIBLE).rev().collect();
    let height = (shown.len() * 3) as u16;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Percentage(50)])
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(height)])
        .split(columns[1]);

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(shown.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(rows[1]);

    for (slot, notification) in slots.iter().zip(shown) {
        let (color, icon) = match notification.level {
            NotificationLevel::Error => (Color::Red, "✗"),
            NotificationLevel::Warning => (Color::Yellow, "⚠"),
            NotificationLevel::Info => (Color::Blue, "ℹ"),
            NotificationLevel::Success => (Color::Green, "✓"),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} {} ", icon, notification.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));

        let paragraph = Paragraph::new(Line::from(notification.message.as_str()))
            .block(block)
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, *slot);
        f.render_widget(paragraph, *slot);
    }
}
