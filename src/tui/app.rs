//! Main TUI application state machine.
//!
//! Handles:
//! - Input event handling for the feature form
//! - Service integration
//! - Non-blocking prediction via background worker

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::artifacts::{ArtifactCache, ArtifactPaths};
use crate::adapters::dense::DenseNetwork;
use crate::adapters::scaler::FittedScaler;
use crate::application::PredictionService;
use crate::config::AppConfig;
use crate::SolarcastError;

use super::ui::{
    form::{render_form, FeatureFormState},
    render_footer, render_header,
    result::{render_action, render_result, PredictionState},
};
use super::worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};

type Service = PredictionService<DenseNetwork, FittedScaler>;

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Prediction pipeline over the cached artifacts
    service: Service,

    /// Sidebar form state
    form_state: FeatureFormState,

    /// Result panel state
    prediction_state: PredictionState,

    /// Pending prediction worker (if running)
    pending_worker: Option<PredictionWorkerHandle>,
}

impl App {
    /// Create the application, loading artifacts through the process-wide cache.
    ///
    /// # Errors
    /// Returns `SolarcastError::Artifact` if any artifact is missing or invalid.
    pub fn new(config: &AppConfig) -> crate::Result<Self> {
        let paths = ArtifactPaths::in_dir(&config.model_dir);
        let artifacts = ArtifactCache::global().get_or_load(&paths)?;

        let service = PredictionService::new(
            artifacts.model.clone(),
            artifacts.input_scaler.clone(),
            artifacts.output_scaler.clone(),
        );

        Ok(Self::with_service(service))
    }

    /// Create application with an injected prediction service.
    #[must_use]
    pub fn with_service(service: Service) -> Self {
        Self {
            should_quit: false,
            service,
            form_state: FeatureFormState::default(),
            prediction_state: PredictionState::default(),
            pending_worker: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();

            terminal.draw(|f| self.draw(f))?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(4), // Footer
            ])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        let panels = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(columns[1]);

        render_header(f, rows[0]);
        render_form(
            f,
            columns[0],
            &self.form_state,
            !self.prediction_state.is_computing(),
        );
        render_action(f, panels[0], &self.prediction_state);
        render_result(f, panels[1], &self.prediction_state);
        render_footer(f, rows[2]);
    }

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        while let Some(progress) = self
            .pending_worker
            .as_ref()
            .and_then(PredictionWorkerHandle::try_recv)
        {
            match progress {
                PredictionProgress::Computing => {
                    self.prediction_state = PredictionState::Computing;
                }
                PredictionProgress::Complete(forecast) => {
                    self.prediction_state = PredictionState::Complete { forecast };
                    self.pending_worker = None;
                }
                PredictionProgress::Error(message) => {
                    tracing::error!("Prediction failed: {}", message);
                    self.prediction_state = PredictionState::Error { message };
                    self.pending_worker = None;
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => self.submit(),
            _ => self.handle_form_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let form = &mut self.form_state;
        match key {
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left => form.step(-1.0),
            KeyCode::Right => form.step(1.0),
            KeyCode::PageUp => form.page(1.0),
            KeyCode::PageDown => form.page(-1.0),
            KeyCode::Home => form.to_min(),
            KeyCode::End => form.to_max(),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.reset_field(),
            KeyCode::Char('r') | KeyCode::Char('R') => form.reset_all(),
            KeyCode::Char(c) => form.input_char(c),
            _ => {}
        }
    }

    fn submit(&mut self) {
        if self.pending_worker.is_some() {
            tracing::debug!("Prediction already running; ignoring request");
            return;
        }

        if self.form_state.commit_pending().is_err() {
            return;
        }

        let input = self.form_state.input_vector();
        if let Err(errors) = input.validate() {
            let err = SolarcastError::Validation(errors.join(", "));
            self.form_state.error_message = Some(err.to_string());
            return;
        }

        self.prediction_state = PredictionState::Computing;
        self.pending_worker = Some(PredictionWorker::spawn(self.service.clone(), input));
    }
}
