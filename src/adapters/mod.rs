//! Adapters layer: Concrete implementations of ports.
//!
//! - `dense`: dense network forward pass over `ndarray`
//! - `scaler`: exported scikit-learn scalers
//! - `artifacts`: loading and caching the three artifact files

pub mod artifacts;
pub mod dense;
pub mod scaler;

pub use artifacts::ArtifactError;
