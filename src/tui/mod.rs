//! TUI module: Terminal User Interface using Ratatui.
//!
//! One screen with:
//! - Input feature sidebar (sliders and numeric entries)
//! - Predict action and forecast panel

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::SolarTheme;
pub use worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};
