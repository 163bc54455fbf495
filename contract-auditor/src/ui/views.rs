//! Main content for each view

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::App;

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn marker(is_selected: bool) -> Span<'static> {
    Span::raw(if is_selected { "▶ " } else { "  " })
}

/// Keep the cursor row inside a list of `visible` rows
fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 || selected < visible {
        0
    } else {
        selected + 1 - visible
    }
}

fn empty_state(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    // Source preview
    let source_title = match &app.source_label {
        Some(label) => format!(" Source: {} ", label),
        None => " Source ".to_string(),
    };
    let source = if app.code.is_empty() {
        Paragraph::new(vec![
            Line::from("No contract loaded."),
            Line::from(""),
            Line::from("Start with --file PATH or load a snippet from the Snippets view."),
        ])
        .style(Style::default().fg(Color::Gray))
    } else {
        Paragraph::new(app.code.as_str())
    };
    f.render_widget(
        source.block(Block::default().borders(Borders::ALL).title(source_title)),
        chunks[0],
    );

    // Findings
    let Some(result) = &app.result else {
        empty_state(
            f,
            chunks[1],
            " Vulnerabilities ",
            vec![Line::from("Press a to analyze the loaded contract.")],
        );
        return;
    };

    if result.vulnerabilities().is_empty() {
        empty_state(
            f,
            chunks[1],
            " Vulnerabilities ",
            vec![Line::from(Span::styled(
                "No vulnerabilities reported.",
                Style::default().fg(Color::Green),
            ))],
        );
        return;
    }

    let visible = chunks[1].height.saturating_sub(2) as usize / 2;
    let offset = scroll_offset(app.result_selected, visible);

    let items: Vec<ListItem> = result
        .vulnerabilities()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, vulnerability)| {
            let is_selected = i == app.result_selected;
            let name_style = if is_selected {
                selected_style()
            } else {
                Style::default().fg(Color::Red)
            };
            ListItem::new(vec![
                Line::from(vec![
                    marker(is_selected),
                    Span::styled(vulnerability.name.clone(), name_style),
                ]),
                Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        vulnerability.description.clone(),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
            ])
        })
        .collect();

    let title = format!(" Vulnerabilities ({}) ", result.vulnerabilities().len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[1]);
}

pub fn render_snippets(f: &mut Frame, area: Rect, app: &App) {
    let snippets = app.context.snippets.list();
    if snippets.is_empty() {
        empty_state(
            f,
            area,
            " Saved Snippets ",
            vec![Line::from(
                "No saved snippets. Press s in the Results view to save the loaded contract.",
            )],
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let visible = chunks[0].height.saturating_sub(2) as usize;
    let offset = scroll_offset(app.snippet_selected, visible);

    let items: Vec<ListItem> = snippets
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, snippet)| {
            let is_selected = i == app.snippet_selected;
            let style = if is_selected {
                selected_style()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                marker(is_selected),
                Span::styled(snippet.name.clone(), style),
                Span::styled(
                    format!("  [{}]", snippet.language),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Saved Snippets ({}) ", snippets.len())),
    );
    f.render_widget(list, chunks[0]);

    if let Some(snippet) = snippets.get(app.snippet_selected) {
        let preview = Paragraph::new(snippet.code.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", snippet.name)),
        );
        f.render_widget(preview, chunks[1]);
    }
}

pub fn render_history(f: &mut Frame, area: Rect, app: &App) {
    if app.history.is_empty() {
        let message = if app.history_loading {
            "Loading history..."
        } else {
            "No history yet. Press r to refresh."
        };
        empty_state(f, area, " History ", vec![Line::from(message)]);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(app.history_selected, visible);

    let items: Vec<ListItem> = app
        .history
        .results()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, result)| {
            let is_cursor = i == app.history_selected;
            let checkbox = if app.history.is_selected(i) { "[x] " } else { "[ ] " };
            let created = result
                .created_at()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            let style = if is_cursor {
                selected_style()
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                marker(is_cursor),
                Span::styled(checkbox, Style::default().fg(Color::Green)),
                Span::styled(format!("{:<10}", result.label(i)), style),
                Span::styled(format!("  {}  ", created), Style::default().fg(Color::Gray)),
                Span::raw(format!(
                    "{} vulnerabilities",
                    result.vulnerabilities().len()
                )),
            ]))
        })
        .collect();

    let selected = app.history.selected_positions().len();
    let title = format!(
        " History ({} entries, {} selected){} ",
        app.history.len(),
        selected,
        if app.history_loading { " refreshing..." } else { "" }
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

pub fn render_compare(f: &mut Frame, area: Rect, app: &App) {
    let Some(matrix) = &app.comparison else {
        empty_state(
            f,
            area,
            " Compare ",
            vec![Line::from(
                "Select at least two entries in the History view (Enter), then press c.",
            )],
        );
        return;
    };

    let header = Row::new(
        std::iter::once(Cell::from("Vulnerability"))
            .chain(matrix.columns.iter().map(|label| Cell::from(label.clone()))),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = matrix
        .rows
        .iter()
        .map(|row| {
            Row::new(
                std::iter::once(Cell::from(row.vulnerability.clone())).chain(
                    row.presence.iter().map(|present| {
                        if *present {
                            Cell::from("✓").style(Style::default().fg(Color::Red))
                        } else {
                            Cell::from("-").style(Style::default().fg(Color::Gray))
                        }
                    }),
                ),
            )
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Min(30))
        .chain(matrix.columns.iter().map(|_| Constraint::Length(10)))
        .collect();

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Compare ({} results) ", matrix.columns.len())),
    );
    f.render_widget(table, area);
}
