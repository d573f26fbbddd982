//! Prediction action and result panels.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::Forecast;
use crate::tui::styles::SolarTheme;

/// Prediction state
#[derive(Debug, Clone, Default)]
pub enum PredictionState {
    /// Nothing predicted yet
    #[default]
    Idle,
    /// Worker running
    Computing,
    /// Completed with result
    Complete { forecast: Forecast },
    /// Error occurred
    Error { message: String },
}

impl PredictionState {
    #[must_use]
    pub fn is_computing(&self) -> bool {
        matches!(self, Self::Computing)
    }
}

/// Error text shown in the result panel.
#[must_use]
pub fn error_text(message: &str) -> String {
    format!("An error occurred during prediction: {message}")
}

/// Render the "Predict Generated Power" action
pub fn render_action(f: &mut Frame, area: Rect, state: &PredictionState) {
    let (label, style) = if state.is_computing() {
        ("  Predicting...  ", SolarTheme::button_busy())
    } else {
        ("  Predict Generated Power  ", SolarTheme::button())
    };

    let content = Paragraph::new(vec![
        Line::from(Span::styled(label, style)),
        Line::from(vec![
            Span::styled("[Enter] ", SolarTheme::key_hint()),
            Span::styled("or ", SolarTheme::key_desc()),
            Span::styled("[P] ", SolarTheme::key_hint()),
            Span::styled("to predict", SolarTheme::key_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(SolarTheme::border()),
    );

    f.render_widget(content, area);
}

/// Render the result panel
pub fn render_result(f: &mut Frame, area: Rect, state: &PredictionState) {
    let (lines, border) = match state {
        PredictionState::Idle => (
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Adjust the inputs, then press Enter to predict.",
                    SolarTheme::text_muted(),
                )),
            ],
            SolarTheme::border(),
        ),
        PredictionState::Computing => (
            vec![
                Line::from(""),
                Line::from(Span::styled("Computing forecast...", SolarTheme::info())),
            ],
            SolarTheme::border(),
        ),
        PredictionState::Complete { forecast } => (
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "⚡ Predicted Solar Power Generation",
                    SolarTheme::subtitle(),
                )),
                Line::from(""),
                Line::from(Span::styled(forecast.display(), SolarTheme::result_value())),
                Line::from(""),
                Line::from(Span::styled(
                    format!("at {}", forecast.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
                    SolarTheme::text_muted(),
                )),
            ],
            SolarTheme::border_focused(),
        ),
        PredictionState::Error { message } => (
            vec![
                Line::from(""),
                Line::from(Span::styled("! Error", SolarTheme::danger())),
                Line::from(""),
                Line::from(Span::styled(error_text(message), SolarTheme::text())),
            ],
            SolarTheme::danger(),
        ),
    };

    let content = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" Forecast ", SolarTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(border),
        );

    f.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(state: &PredictionState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|f| render_result(f, f.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_complete_shows_kilowatts() {
        let state = PredictionState::Complete {
            forecast: Forecast::new(1234.567),
        };
        assert!(rendered(&state).contains("1,234.57 KW"));
    }

    #[test]
    fn test_error_is_prefixed() {
        assert_eq!(
            error_text("model returned a non-finite value"),
            "An error occurred during prediction: model returned a non-finite value"
        );
        let state = PredictionState::Error {
            message: "boom".to_string(),
        };
        assert!(rendered(&state).contains("! Error"));
    }

    #[test]
    fn test_only_computing_is_busy() {
        assert!(PredictionState::Computing.is_computing());
        assert!(!PredictionState::Idle.is_computing());
    }
}
