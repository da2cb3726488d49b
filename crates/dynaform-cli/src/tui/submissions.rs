use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::{App, Focus};

/// Render the submitted-data table for the active form type.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Submissions;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let table_view = match app.engine.table_view() {
        Some(view) if !view.is_empty() => view,
        _ => {
            let empty = Paragraph::new("No submissions yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border_style)
                        .title("Submitted Data"),
                );
            frame.render_widget(empty, area);
            return;
        }
    };

    let header = Row::new(
        std::iter::once(Cell::from("#").style(Style::default().fg(Color::DarkGray))).chain(
            table_view
                .headers
                .iter()
                .map(|h| Cell::from(h.clone()).style(Style::default().add_modifier(Modifier::BOLD))),
        ),
    )
    .height(1);

    let rows: Vec<Row> = table_view
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if focused && i == app.selected_row {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(
                std::iter::once(Cell::from(format!("{}", i + 1)))
                    .chain(row.iter().map(|value| Cell::from(value.clone()))),
            )
            .style(style)
        })
        .collect();

    let column_count = u32::try_from(table_view.headers.len().max(1)).unwrap_or(u32::MAX);
    let widths = std::iter::once(Constraint::Length(4)).chain(
        table_view
            .headers
            .iter()
            .map(|_| Constraint::Ratio(1, column_count)),
    );

    let title = format!("Submitted Data ({})", table_view.rows.len());
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    frame.render_widget(table, area);
}
