//! Scaler adapter: Implementation of `Scaler` for exported scikit-learn scalers.
//!
//! The exporter writes the fitted attributes as JSON tagged by `kind`:
//! - `standard`: `mean_` and `scale_` of a `StandardScaler`
//! - `min_max`: `min_` and `scale_` of a `MinMaxScaler`

use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::domain::PredictionError;
use crate::ports::Scaler;

/// `(x - mean) / scale`, per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// `None` when fitted with `with_mean=False`
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    /// `None` when fitted with `with_std=False`
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

/// `x * scale + min`, per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
    /// Clip transformed values to the fitted feature range
    #[serde(default)]
    pub clip: bool,
    #[serde(default = "default_feature_range")]
    pub feature_range: (f64, f64),
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// A scaler restored from the training pipeline's export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedScaler {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl FittedScaler {
    /// Standard scaler with both centring and scaling.
    ///
    /// # Errors
    /// Returns error if the parameters are inconsistent (see [`FittedScaler::validate`]).
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        let scaler = Self::Standard(StandardScaler {
            mean: Some(mean),
            scale: Some(scale),
        });
        scaler.validate()?;
        Ok(scaler)
    }

    /// Min-max scaler onto `[0, 1]` without clipping.
    ///
    /// # Errors
    /// Returns error if the parameters are inconsistent (see [`FittedScaler::validate`]).
    pub fn min_max(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        let scaler = Self::MinMax(MinMaxScaler {
            min,
            scale,
            clip: false,
            feature_range: default_feature_range(),
        });
        scaler.validate()?;
        Ok(scaler)
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Standard(_) => "standard",
            Self::MinMax(_) => "min_max",
        }
    }

    /// Check the fitted attributes are usable.
    ///
    /// # Errors
    /// Returns error if the column count cannot be determined, vectors disagree in
    /// length, or any value is non-finite or a scale is zero.
    pub fn validate(&self) -> Result<(), String> {
        let (a, b) = match self {
            Self::Standard(s) => (s.mean.as_deref(), s.scale.as_deref()),
            Self::MinMax(s) => (Some(s.min.as_slice()), Some(s.scale.as_slice())),
        };

        let n = match (a, b) {
            (Some(a), Some(b)) if a.len() != b.len() => {
                return Err(format!(
                    "offset has {} columns but scale has {}",
                    a.len(),
                    b.len()
                ))
            }
            (Some(a), _) => a.len(),
            (None, Some(b)) => b.len(),
            (None, None) => return Err("scaler has neither offset nor scale".into()),
        };
        if n == 0 {
            return Err("scaler has no columns".into());
        }
        if a.into_iter().chain(b).flatten().any(|v| !v.is_finite()) {
            return Err("scaler contains non-finite values".into());
        }
        if b.is_some_and(|s| s.iter().any(|v| *v == 0.0)) {
            return Err("scaler contains a zero scale".into());
        }
        if let Self::MinMax(s) = self {
            let (lo, hi) = s.feature_range;
            if lo.is_nan() || hi.is_nan() || lo >= hi {
                return Err("feature_range must be increasing".into());
            }
        }
        Ok(())
    }

    fn check_width(
        &self,
        batch: &ArrayView2<'_, f64>,
        stage: &'static str,
    ) -> Result<(), PredictionError> {
        let expected = self.n_features();
        if batch.ncols() != expected {
            return Err(PredictionError::ShapeMismatch {
                stage,
                expected,
                got: batch.ncols(),
            });
        }
        Ok(())
    }
}

fn row(values: &[f64]) -> Array1<f64> {
    Array1::from(values.to_vec())
}

impl Scaler for FittedScaler {
    fn n_features(&self) -> usize {
        match self {
            Self::Standard(s) => s
                .mean
                .as_ref()
                .or(s.scale.as_ref())
                .map_or(0, Vec::len),
            Self::MinMax(s) => s.min.len(),
        }
    }

    fn transform(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>, PredictionError> {
        self.check_width(&batch, "scaler transform")?;
        let mut x = batch.to_owned();
        match self {
            Self::Standard(s) => {
                if let Some(mean) = &s.mean {
                    x -= &row(mean);
                }
                if let Some(scale) = &s.scale {
                    x /= &row(scale);
                }
            }
            Self::MinMax(s) => {
                x *= &row(&s.scale);
                x += &row(&s.min);
                if s.clip {
                    let (lo, hi) = s.feature_range;
                    x.mapv_inplace(|v| v.clamp(lo, hi));
                }
            }
        }
        Ok(x)
    }

    fn inverse_transform(
        &self,
        batch: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, PredictionError> {
        self.check_width(&batch, "scaler inverse transform")?;
        let mut x = batch.to_owned();
        match self {
            Self::Standard(s) => {
                if let Some(scale) = &s.scale {
                    x *= &row(scale);
                }
                if let Some(mean) = &s.mean {
                    x += &row(mean);
                }
            }
            Self::MinMax(s) => {
                x -= &row(&s.min);
                x /= &row(&s.scale);
            }
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_transform_and_inverse() {
        let s = FittedScaler::standard(vec![10.0, 0.0], vec![2.0, 4.0]).expect("Valid scaler");
        let x = array![[12.0, -8.0]];
        let t = s.transform(x.view()).expect("Should transform");
        assert!((t[[0, 0]] - 1.0).abs() < 1e-12);
        assert!((t[[0, 1]] + 2.0).abs() < 1e-12);

        let back = s.inverse_transform(t.view()).expect("Should invert");
        assert!((back[[0, 0]] - 12.0).abs() < 1e-12);
        assert!((back[[0, 1]] + 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_inverse() {
        // fitted on y in [0, 1000]: scale = 1/1000, min = 0
        let s = FittedScaler::min_max(vec![0.0], vec![0.001]).expect("Valid scaler");
        let y = s.inverse_transform(array![[0.25]].view()).expect("Should invert");
        assert!((y[[0, 0]] - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_max_clip() {
        let s = FittedScaler::MinMax(MinMaxScaler {
            min: vec![0.0],
            scale: vec![0.1],
            clip: true,
            feature_range: (0.0, 1.0),
        });
        let t = s.transform(array![[50.0]].view()).expect("Should transform");
        assert!((t[[0, 0]] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_width_mismatch() {
        let s = FittedScaler::standard(vec![0.0; 3], vec![1.0; 3]).expect("Valid scaler");
        let err = s.transform(array![[1.0, 2.0]].view()).expect_err("Should fail");
        assert_eq!(
            err,
            PredictionError::ShapeMismatch {
                stage: "scaler transform",
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn test_validation() {
        assert!(FittedScaler::standard(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(FittedScaler::standard(vec![0.0], vec![0.0]).is_err());
        assert!(FittedScaler::min_max(vec![], vec![]).is_err());
        assert!(FittedScaler::min_max(vec![f64::INFINITY], vec![1.0]).is_err());
    }

    #[test]
    fn test_parse_tagged_json() {
        let s: FittedScaler =
            serde_json::from_str(r#"{"kind": "standard", "mean": null, "scale": [2.0, 2.0]}"#)
                .expect("Valid JSON");
        assert_eq!(s.kind(), "standard");
        assert_eq!(s.n_features(), 2);
        assert!(s.validate().is_ok());

        let m: FittedScaler =
            serde_json::from_str(r#"{"kind": "min_max", "min": [0.5], "scale": [0.5]}"#)
                .expect("Valid JSON");
        assert_eq!(m.kind(), "min_max");
        assert!(serde_json::from_str::<FittedScaler>(r#"{"kind": "robust"}"#).is_err());
    }
}
