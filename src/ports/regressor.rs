//! Regressor port: Trait for the pre-trained model's forward pass.
//!
//! This trait abstracts the serialized network from the prediction workflow.

use ndarray::{Array2, ArrayView2};

use crate::domain::PredictionError;

/// A trained regression model.
///
/// Implementations are immutable once loaded and shared read-only across predictions.
pub trait Regressor: Send + Sync {
    /// Number of input columns the model expects.
    fn input_dim(&self) -> usize;

    /// Number of output columns the model produces.
    fn output_dim(&self) -> usize;

    /// Run the forward pass on a batch of already-scaled rows.
    ///
    /// # Arguments
    /// * `batch` - `(n x input_dim)` scaled inputs
    ///
    /// # Errors
    /// Returns `PredictionError::ShapeMismatch` if the batch width differs from `input_dim`.
    fn forward(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>, PredictionError>;
}
