//! Ordered model input assembled from the form.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::feature::{FEATURES, FEATURE_COUNT};

/// Raw feature values in [`FEATURES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputVector {
    values: [f64; FEATURE_COUNT],
}

impl InputVector {
    /// All features at their descriptor mean.
    #[must_use]
    pub fn defaults() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (v, d) in values.iter_mut().zip(FEATURES.iter()) {
            *v = d.mean;
        }
        Self { values }
    }

    /// Build from a slice in training order.
    ///
    /// # Errors
    /// Returns error if the slice does not hold exactly [`FEATURE_COUNT`] values.
    pub fn from_slice(v: &[f64]) -> Result<Self, String> {
        let values: [f64; FEATURE_COUNT] = v
            .try_into()
            .map_err(|_| format!("Expected {FEATURE_COUNT} features, got {}", v.len()))?;
        Ok(Self { values })
    }

    #[must_use]
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Return a copy with one feature replaced.
    #[must_use]
    pub fn with(mut self, index: usize, value: f64) -> Self {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
        self
    }

    /// Single-row batch `(1 x FEATURE_COUNT)` as the scaler and model expect.
    #[must_use]
    pub fn to_row(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, j)| self.values[j])
    }

    /// Check every value against its descriptor range.
    ///
    /// # Errors
    /// Returns one message per offending feature.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .values
            .iter()
            .zip(FEATURES.iter())
            .filter(|(v, d)| !v.is_finite() || !d.contains(**v))
            .map(|(v, d)| {
                format!(
                    "{} {} out of range [{:.2}, {:.2}]",
                    d.label(),
                    v,
                    d.min,
                    d.max
                )
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for InputVector {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_means() {
        let v = InputVector::defaults();
        for (i, d) in FEATURES.iter().enumerate() {
            assert_eq!(v.get(i), Some(d.mean));
        }
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_from_slice_length() {
        assert!(InputVector::from_slice(&[0.0; 19]).is_err());
        let v = InputVector::from_slice(&[1.0; FEATURE_COUNT]).expect("Should build");
        assert_eq!(v.get(19), Some(1.0));
    }

    #[test]
    fn test_to_row_shape_and_order() {
        let v = InputVector::defaults().with(2, 1000.0);
        let row = v.to_row();
        assert_eq!(row.dim(), (1, FEATURE_COUNT));
        assert!((row[[0, 2]] - 1000.0).abs() < f64::EPSILON);
        assert!((row[[0, 0]] - 15.07).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_reports_each_offender() {
        let v = InputVector::defaults()
            .with(0, 100.0)
            .with(19, f64::NAN);
        let errors = v.validate().expect_err("Should fail");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Temperature 2 M Above Gnd"));
    }
}
