use dynaform_core::FormView;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use super::{submissions, App, Focus};

/// Render the whole screen: picker, form, submissions, and help.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Title bar
            Constraint::Min(10),        // Picker + form
            Constraint::Percentage(30), // Submissions
            Constraint::Length(3),      // Status + help
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);

    render_title(frame, chunks[0]);
    render_picker(frame, app, body[0]);
    render_form(frame, app, body[1]);
    submissions::render(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Dynamic Form")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_picker(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.engine.session().schema_name();
    let lines: Vec<Line> = app
        .form_types
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let marker = if active == Some(name.as_str()) { "● " } else { "  " };
            let style = if i == app.selected_type && app.focus == Focus::Picker {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Line::styled(format!("{}{}", marker, name), style)
        })
        .collect();

    let picker = Paragraph::new(lines).block(pane_block(
        "Choose Form Type".to_string(),
        app.focus == Focus::Picker,
    ));
    frame.render_widget(picker, area);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Form;
    let Some(view) = app.engine.form_view() else {
        let hint = Paragraph::new("Select a form type to begin.")
            .style(Style::default().fg(Color::DarkGray))
            .block(pane_block("Form".to_string(), focused));
        frame.render_widget(hint, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let lines = field_lines(&view, app);
    let fields = Paragraph::new(lines).block(pane_block(view.schema_name.clone(), focused));
    frame.render_widget(fields, chunks[0]);

    let percent = view.progress.round().clamp(0.0, 100.0) as u16;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent);
    frame.render_widget(gauge, chunks[1]);
}

fn field_lines<'a>(view: &'a FormView, app: &App) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(view.fields.len() * 2);

    for (i, field) in view.fields.iter().enumerate() {
        let selected = i == app.selected_field && app.focus == Focus::Form;
        let value = match (&app.editing, selected) {
            (Some(buffer), true) => format!("{}_", buffer),
            _ if field.kind == "password" && !field.value.is_empty() => {
                "*".repeat(field.value.chars().count())
            }
            _ if field.value.is_empty() && !field.options.is_empty() => "Select...".to_string(),
            _ => field.value.clone(),
        };

        let label_style = if selected {
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow)
        } else {
            Style::default()
        };
        let marker = if field.required { "*" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!("{}{}: ", marker, field.label), label_style),
            Span::raw(value),
            Span::styled(
                format!("  ({})", field.kind),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        if let Some(error) = &field.error {
            lines.push(Line::styled(
                format!("   {}", error),
                Style::default().fg(Color::Red),
            ));
        }
    }

    lines
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help = match (&app.editing, app.focus) {
        (Some(_), _) => "  Type to edit  Enter Save  Esc Cancel",
        (None, Focus::Picker) => "  \u{2191}/k Up  \u{2193}/j Down  Enter Select  Tab Next pane  q Quit",
        (None, Focus::Form) => {
            "  \u{2191}\u{2193} Field  Enter Edit  \u{2190}\u{2192} Option  x Clear  s Submit  Tab Next pane  q Quit"
        }
        (None, Focus::Submissions) => {
            "  \u{2191}\u{2193} Row  e Edit  d Delete  Tab Next pane  q Quit"
        }
    };

    let (text, style) = match &app.status {
        Some(status) if status.is_error => (
            format!("{}  |  {}", status.message, help.trim_start()),
            Style::default().fg(Color::Red),
        ),
        Some(status) => (
            format!("{}  |  {}", status.message, help.trim_start()),
            Style::default().fg(Color::Green),
        ),
        None => (help.to_string(), Style::default().fg(Color::DarkGray)),
    };

    let bar = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}
