use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use dynaform_core::{Error, EventOutcome, FieldKind, FormEngine, FormEvent, StaticRegistry};
use ratatui::prelude::*;

pub mod form;
pub mod submissions;

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Picker,
    Form,
    Submissions,
}

/// One-line feedback shown under the panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

/// Application state for the form TUI.
#[derive(Debug)]
pub struct App {
    pub engine: FormEngine<StaticRegistry>,
    pub form_types: Vec<String>,
    pub focus: Focus,
    pub selected_type: usize,
    pub selected_field: usize,
    pub selected_row: usize,
    /// Input buffer while a field is being edited.
    pub editing: Option<String>,
    pub status: Option<Status>,
    pub should_quit: bool,
}

impl App {
    pub fn new(registry: StaticRegistry) -> Self {
        let engine = FormEngine::new(registry);
        let form_types = engine.form_types();
        Self {
            engine,
            form_types,
            focus: Focus::Picker,
            selected_type: 0,
            selected_field: 0,
            selected_row: 0,
            editing: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if self.editing.is_some() {
            self.handle_edit_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.cycle_focus(),
            _ => match self.focus {
                Focus::Picker => self.handle_picker_key(key),
                Focus::Form => self.handle_form_key(key),
                Focus::Submissions => self.handle_submissions_key(key),
            },
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = if self.engine.session().is_active() {
            match self.focus {
                Focus::Picker => Focus::Form,
                Focus::Form => Focus::Submissions,
                Focus::Submissions => Focus::Picker,
            }
        } else {
            Focus::Picker
        };
    }

    fn handle_picker_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_type + 1 < self.form_types.len() {
                    self.selected_type += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_type = self.selected_type.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(name) = self.form_types.get(self.selected_type).cloned() {
                    self.apply(FormEvent::SelectSchema(name));
                    self.selected_field = 0;
                    self.selected_row = 0;
                    self.focus = Focus::Form;
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let field_count = self.engine.session().fields().len();
        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_field + 1 < field_count {
                    self.selected_field += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(field) = self.selected_field_name() {
                    let current = self.engine.session().record().get(&field).to_string();
                    self.editing = Some(current);
                }
            }
            KeyCode::Left => self.cycle_option(false),
            KeyCode::Right => self.cycle_option(true),
            KeyCode::Char('x') => {
                if let Some(field) = self.selected_field_name() {
                    self.apply(FormEvent::Input {
                        field,
                        value: String::new(),
                    });
                }
            }
            KeyCode::Char('s') => self.apply(FormEvent::Submit),
            _ => {}
        }
    }

    fn handle_submissions_key(&mut self, key: KeyCode) {
        let row_count = self.engine.submissions().map_or(0, |s| s.len());
        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_row + 1 < row_count {
                    self.selected_row += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if row_count > 0 {
                    self.apply(FormEvent::Edit(self.selected_row));
                    self.focus = Focus::Form;
                }
            }
            KeyCode::Char('d') => {
                if row_count > 0 {
                    self.apply(FormEvent::Delete(self.selected_row));
                }
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.editing = None,
            KeyCode::Backspace => {
                if let Some(buffer) = self.editing.as_mut() {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = self.editing.as_mut() {
                    buffer.push(c);
                }
            }
            KeyCode::Enter => self.commit_edit(),
            _ => {}
        }
    }

    /// Route the edit buffer to the engine.
    ///
    /// Input the field's kind rejects keeps the editor open, the way a typed
    /// input widget refuses it.
    fn commit_edit(&mut self) {
        let Some(field) = self.selected_field_name() else {
            self.editing = None;
            return;
        };
        let value = self.editing.clone().unwrap_or_default();

        match self.engine.dispatch(FormEvent::Input { field, value }) {
            Err(e @ Error::InvalidValue(_)) => self.set_status(e.to_string(), true),
            result => {
                self.editing = None;
                self.settle(result);
            }
        }
    }

    fn cycle_option(&mut self, forward: bool) {
        let Some(field) = self.engine.session().fields().get(self.selected_field) else {
            return;
        };
        let FieldKind::Choice { options } = field.kind() else {
            return;
        };

        let current = self.engine.session().record().get(field.name());
        let position = options.iter().position(|o| o == current);
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };

        let event = FormEvent::Input {
            field: field.name().to_string(),
            value: options[next].clone(),
        };
        self.apply(event);
    }

    fn selected_field_name(&self) -> Option<String> {
        self.engine
            .session()
            .fields()
            .get(self.selected_field)
            .map(|f| f.name().to_string())
    }

    fn apply(&mut self, event: FormEvent) {
        let result = self.engine.dispatch(event);
        self.settle(result);
    }

    fn settle(&mut self, result: dynaform_core::Result<EventOutcome>) {
        match result {
            Ok(outcome) => self.report(outcome),
            Err(e) => self.set_status(e.to_string(), true),
        }
    }

    fn report(&mut self, outcome: EventOutcome) {
        match outcome {
            EventOutcome::SchemaSelected(name) => {
                self.set_status(format!("Loaded {}", name), false);
            }
            EventOutcome::ValueSet(_) => self.status = None,
            EventOutcome::Submitted { .. } => {
                self.set_status("Form submitted successfully!".to_string(), false);
            }
            EventOutcome::Rejected(errors) => {
                self.set_status(
                    format!("Please fill in {} required field(s)", errors.len()),
                    true,
                );
            }
            EventOutcome::Recalled { index } => {
                self.clamp_row();
                self.set_status(format!("Editing entry {}", index + 1), false);
            }
            EventOutcome::Deleted { .. } => {
                self.clamp_row();
                self.set_status("Entry deleted successfully!".to_string(), false);
            }
        }
    }

    fn clamp_row(&mut self) {
        let row_count = self.engine.submissions().map_or(0, |s| s.len());
        if self.selected_row >= row_count {
            self.selected_row = row_count.saturating_sub(1);
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status = Some(Status { message, is_error });
    }
}

/// Write every schema's submissions to `path` as JSON.
pub fn export_submissions(app: &App, path: &Path) -> Result<()> {
    let stores: Vec<_> = app.engine.stores().collect();
    let json = serde_json::to_string_pretty(&stores)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write submissions to {}", path.display()))?;
    log::info!("Exported submissions to {}", path.display());
    Ok(())
}

/// Run the form TUI.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(registry: StaticRegistry, export: Option<PathBuf>) -> Result<()> {
    let app = App::new(registry);

    if app.form_types.is_empty() {
        println!("No form types defined.");
        println!("Run 'dynaform schemas validate' to check your schema file.");
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let app = result?;
    if let Some(path) = export {
        export_submissions(&app, &path)?;
        println!("✓ Wrote submissions to {}", path.display());
    }
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<App> {
    loop {
        terminal.draw(|frame| form::render(frame, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            return Ok(app);
        }
    }
}
