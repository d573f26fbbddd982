//! Scaler port: Trait for fitted, invertible feature transforms.

use ndarray::{Array2, ArrayView2};

use crate::domain::PredictionError;

/// A fitted per-column transform with an exact inverse.
///
/// The input-side scaler maps raw feature units into model units; the output-side
/// scaler maps the model's normalized prediction back to kilowatts.
pub trait Scaler: Send + Sync {
    /// Number of columns the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Forward transform (raw units to model units).
    ///
    /// # Errors
    /// Returns `PredictionError::ShapeMismatch` if the batch width differs from `n_features`.
    fn transform(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>, PredictionError>;

    /// Inverse transform (model units to raw units).
    ///
    /// # Errors
    /// Returns `PredictionError::ShapeMismatch` if the batch width differs from `n_features`.
    fn inverse_transform(&self, batch: ArrayView2<'_, f64>)
        -> Result<Array2<f64>, PredictionError>;
}
