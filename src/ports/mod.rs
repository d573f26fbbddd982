//! Ports layer: Trait definitions for the model artifacts.
//!
//! These traits define the boundary between the prediction workflow and the
//! concrete artifact formats loaded from disk.

mod regressor;
mod scaler;

pub use regressor::Regressor;
pub use scaler::Scaler;
