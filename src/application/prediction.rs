//! Prediction service: scales the form input, runs the model, inverse-scales the output.
//!
//! Pipeline:
//! 1. Input scaler forward transform
//! 2. Model forward pass
//! 3. Output scaler inverse transform

use std::sync::Arc;

use ndarray::Array2;

use crate::domain::{Forecast, InputVector, PredictionError};
use crate::ports::{Regressor, Scaler};

/// Service for turning one input vector into a power forecast.
///
/// Holds only shared, immutable artifacts, so repeated calls on the same input
/// return the same value.
pub struct PredictionService<R, S>
where
    R: Regressor,
    S: Scaler,
{
    model: Arc<R>,
    input_scaler: Arc<S>,
    output_scaler: Arc<S>,
}

impl<R, S> Clone for PredictionService<R, S>
where
    R: Regressor,
    S: Scaler,
{
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            input_scaler: self.input_scaler.clone(),
            output_scaler: self.output_scaler.clone(),
        }
    }
}

impl<R, S> PredictionService<R, S>
where
    R: Regressor,
    S: Scaler,
{
    /// Create a new prediction service.
    pub fn new(model: Arc<R>, input_scaler: Arc<S>, output_scaler: Arc<S>) -> Self {
        Self {
            model,
            input_scaler,
            output_scaler,
        }
    }

    /// Predict generated power for one input vector.
    ///
    /// # Errors
    /// Returns `PredictionError` if any stage sees a shape it does not expect or
    /// produces a non-finite value.
    pub fn predict(&self, input: &InputVector) -> Result<Forecast, PredictionError> {
        tracing::debug!("Step 1: Scaling input features...");
        let scaled = self.input_scaler.transform(input.to_row().view())?;
        ensure_finite(&scaled, "input scaling")?;

        tracing::debug!("Step 2: Running model forward pass...");
        let output = self.model.forward(scaled.view())?;
        if output.dim() != (1, 1) {
            return Err(PredictionError::NotScalar {
                stage: "model",
                rows: output.nrows(),
                cols: output.ncols(),
            });
        }
        ensure_finite(&output, "model")?;

        tracing::debug!("Step 3: Inverse-scaling prediction...");
        let restored = self.output_scaler.inverse_transform(output.view())?;
        let kilowatts = restored[[0, 0]];
        if !kilowatts.is_finite() {
            return Err(PredictionError::NonFinite {
                stage: "output scaling",
            });
        }

        let forecast = Forecast::new(kilowatts);
        tracing::info!("Prediction complete: {}", forecast);
        Ok(forecast)
    }
}

fn ensure_finite(values: &Array2<f64>, stage: &'static str) -> Result<(), PredictionError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(PredictionError::NonFinite { stage })
    }
}
