//! Domain layer: Core types for the solar power forecast.
//!
//! Pure data types with no I/O. Feature order here is the order the model was trained with.

mod error;
pub mod feature;
mod forecast;
mod input;

pub use error::PredictionError;
pub use feature::{ControlKind, FeatureDescriptor, FEATURES, FEATURE_COUNT};
pub use forecast::{format_kilowatts, Forecast};
pub use input::InputVector;
