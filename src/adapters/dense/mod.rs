//! Dense network adapter: Implementation of `Regressor` for a fully-connected network.
//!
//! The network is exported by the training pipeline as JSON: one entry per Keras
//! `Dense` layer with its kernel (`inputs x units`), bias and activation name.
//! Inference is a plain sequential forward pass; there is no training state.

use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::domain::PredictionError;
use crate::ports::Regressor;

/// Activation functions understood by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Elu,
    Selu,
    Softplus,
    Swish,
}

const SELU_ALPHA: f64 = 1.673_263_242_354_377_2;
const SELU_SCALE: f64 = 1.050_700_987_355_480_5;

impl Activation {
    #[must_use]
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Self::Linear => z,
            Self::Relu => z.max(0.0),
            Self::Sigmoid => sigmoid(z),
            Self::Tanh => z.tanh(),
            Self::Elu => {
                if z > 0.0 {
                    z
                } else {
                    z.exp_m1()
                }
            }
            Self::Selu => {
                if z > 0.0 {
                    SELU_SCALE * z
                } else {
                    SELU_SCALE * SELU_ALPHA * z.exp_m1()
                }
            }
            // log(1 + e^z) without overflow for large z
            Self::Softplus => z.max(0.0) + (-z.abs()).exp().ln_1p(),
            Self::Swish => z * sigmoid(z),
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// One fully-connected layer.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    kernel: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

impl DenseLayer {
    /// Create a layer from its weights.
    ///
    /// # Errors
    /// Returns error if the bias length differs from the kernel width or any weight is non-finite.
    pub fn new(
        kernel: Array2<f64>,
        bias: Array1<f64>,
        activation: Activation,
    ) -> Result<Self, String> {
        if kernel.nrows() == 0 || kernel.ncols() == 0 {
            return Err("layer kernel is empty".into());
        }
        if bias.len() != kernel.ncols() {
            return Err(format!(
                "bias has {} entries but kernel has {} units",
                bias.len(),
                kernel.ncols()
            ));
        }
        if kernel.iter().chain(bias.iter()).any(|w| !w.is_finite()) {
            return Err("layer contains non-finite weights".into());
        }

        Ok(Self {
            kernel,
            bias,
            activation,
        })
    }

    #[must_use]
    pub fn input_dim(&self) -> usize {
        self.kernel.nrows()
    }

    #[must_use]
    pub fn units(&self) -> usize {
        self.kernel.ncols()
    }

    #[must_use]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    fn forward(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let mut z = x.dot(&self.kernel);
        z += &self.bias;
        let act = self.activation;
        z.mapv_inplace(|v| act.apply(v));
        z
    }
}

/// Layer as written by the exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedDenseLayer {
    #[serde(default)]
    pub activation: Activation,
    pub kernel: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

/// Network as written by the exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedDenseNetwork {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub layers: Vec<ExportedDenseLayer>,
}

impl TryFrom<ExportedDenseLayer> for DenseLayer {
    type Error = String;

    fn try_from(layer: ExportedDenseLayer) -> Result<Self, Self::Error> {
        let rows = layer.kernel.len();
        let cols = layer.kernel.first().map_or(0, Vec::len);
        if layer.kernel.iter().any(|row| row.len() != cols) {
            return Err("kernel rows have different lengths".into());
        }

        let flat: Vec<f64> = layer.kernel.into_iter().flatten().collect();
        let kernel = Array2::from_shape_vec((rows, cols), flat).map_err(|e| e.to_string())?;
        DenseLayer::new(kernel, Array1::from(layer.bias), layer.activation)
    }
}

/// Sequential stack of dense layers.
#[derive(Debug, Clone)]
pub struct DenseNetwork {
    name: String,
    feature_names: Option<Vec<String>>,
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Chain layers into a network.
    ///
    /// # Errors
    /// Returns error if there are no layers or a layer's input width differs from
    /// the previous layer's units.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, String> {
        if layers.is_empty() {
            return Err("network has no layers".into());
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[1].input_dim() != pair[0].units() {
                return Err(format!(
                    "layer {} expects {} inputs but layer {} has {} units",
                    i + 1,
                    pair[1].input_dim(),
                    i,
                    pair[0].units()
                ));
            }
        }

        Ok(Self {
            name: "dense".to_string(),
            feature_names: None,
            layers,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names recorded by the exporter, if any.
    #[must_use]
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    #[must_use]
    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Total number of weights and biases.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|l| (l.input_dim() + 1) * l.units())
            .sum()
    }
}

impl TryFrom<ExportedDenseNetwork> for DenseNetwork {
    type Error = String;

    fn try_from(export: ExportedDenseNetwork) -> Result<Self, Self::Error> {
        let layers = export
            .layers
            .into_iter()
            .enumerate()
            .map(|(i, l)| DenseLayer::try_from(l).map_err(|e| format!("layer {i}: {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        let mut network = Self::new(layers)?;
        if let Some(name) = export.name {
            network.name = name;
        }
        if let Some(names) = export.feature_names {
            if names.len() != network.input_dim() {
                return Err(format!(
                    "feature_names lists {} columns but the first layer takes {}",
                    names.len(),
                    network.input_dim()
                ));
            }
            network.feature_names = Some(names);
        }
        Ok(network)
    }
}

impl Regressor for DenseNetwork {
    fn input_dim(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_dim)
    }

    fn output_dim(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::units)
    }

    fn forward(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>, PredictionError> {
        if batch.ncols() != self.input_dim() {
            return Err(PredictionError::ShapeMismatch {
                stage: "model",
                expected: self.input_dim(),
                got: batch.ncols(),
            });
        }

        let mut x = batch.to_owned();
        for layer in &self.layers {
            x = layer.forward(x.view());
        }
        Ok(x)
    }
}
