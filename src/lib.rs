//! # Solarcast
//!
//! Solar power generation forecasting from weather and solar-geometry readings.
//!
//! This crate provides:
//! - Loading of a pre-trained dense network and its fitted scalers
//! - A prediction pipeline (scale, forward pass, inverse-scale)
//! - Terminal UI for entering the 20 readings and viewing the forecast
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (feature table, input vector, forecast)
//! - `ports`: Trait definitions for the model and scalers
//! - `adapters`: Concrete implementations (dense network, scalers, artifact loader)
//! - `application`: The prediction use case
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Forecast, InputVector, PredictionError};

/// Result type for Solarcast operations
pub type Result<T> = std::result::Result<T, SolarcastError>;

/// Main error type for Solarcast
#[derive(Debug, thiserror::Error)]
pub enum SolarcastError {
    #[error("Artifact loading failed: {0}")]
    Artifact(#[from] adapters::ArtifactError),

    #[error("An error occurred during prediction: {0}")]
    Prediction(#[from] PredictionError),

    #[error("Invalid input: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_error_message() {
        let err = SolarcastError::from(PredictionError::NonFinite { stage: "model" });
        assert_eq!(
            err.to_string(),
            "An error occurred during prediction: model: produced a non-finite value"
        );
    }
}
