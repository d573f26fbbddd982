//! UI module: View components for the TUI.

pub mod form;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::SolarTheme;

pub const FOOTER_TEXT: &str = "This app predicts solar power generation based on various weather and solar angle parameters using advanced neural networks.";

pub fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" ☀ ", SolarTheme::subtitle()),
            Span::styled("Solar Power Generation Forecasting", SolarTheme::title()),
        ]),
        Line::from(Span::styled(
            " Use the sidebar to input weather data and press Enter to predict.",
            SolarTheme::text_secondary(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(SolarTheme::border()),
    );

    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(FOOTER_TEXT, SolarTheme::text_muted())),
        Line::from(vec![
            Span::styled("[↑/↓] ", SolarTheme::key_hint()),
            Span::styled("Field ", SolarTheme::key_desc()),
            Span::styled("[←/→] ", SolarTheme::key_hint()),
            Span::styled("Adjust ", SolarTheme::key_desc()),
            Span::styled("[PgUp/PgDn] ", SolarTheme::key_hint()),
            Span::styled("Coarse ", SolarTheme::key_desc()),
            Span::styled("[Del] ", SolarTheme::key_hint()),
            Span::styled("Reset Field ", SolarTheme::key_desc()),
            Span::styled("[R] ", SolarTheme::key_hint()),
            Span::styled("Reset All ", SolarTheme::key_desc()),
            Span::styled("[Q] ", SolarTheme::key_hint()),
            Span::styled("Quit", SolarTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(SolarTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
