//! Recoverable prediction failures.

/// Error raised while scaling or running the model on one input.
///
/// These never take the application down: the form stays usable for another attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("{stage}: expected {expected} columns, got {got}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{stage}: expected a single value, got a {rows}x{cols} output")]
    NotScalar {
        stage: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("{stage}: produced a non-finite value")]
    NonFinite { stage: &'static str },

    #[error("Prediction worker failed: {0}")]
    Worker(String),
}
