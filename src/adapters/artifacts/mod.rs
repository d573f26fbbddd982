//! Artifact loader: reads the trained network and both fitted scalers from disk.
//!
//! The three files live side by side in one directory:
//! - `spfnet_model.json`: dense network export
//! - `sc_X.json`: input-side scaler (raw features to model units)
//! - `sc_y.json`: output-side scaler (model units to kilowatts)
//!
//! Any missing, unreadable or malformed file is fatal. Loading happens once per
//! process through [`ArtifactCache`].

mod cache;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::adapters::dense::{DenseNetwork, ExportedDenseNetwork};
use crate::adapters::scaler::FittedScaler;
use crate::domain::{feature, FEATURE_COUNT};
use crate::ports::{Regressor, Scaler};

pub use cache::ArtifactCache;

pub const MODEL_FILE: &str = "spfnet_model.json";
pub const INPUT_SCALER_FILE: &str = "sc_X.json";
pub const OUTPUT_SCALER_FILE: &str = "sc_y.json";

/// Which of the three artifacts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    InputScaler,
    OutputScaler,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => write!(f, "Model"),
            Self::InputScaler => write!(f, "Scaler X"),
            Self::OutputScaler => write!(f, "Scaler Y"),
        }
    }
}

/// Fatal error while loading artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{kind} file not found at {}", path.display())]
    Missing { kind: ArtifactKind, path: PathBuf },

    #[error("Failed to read {kind} file {}: {source}", path.display())]
    Read {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} file {}: {source}", path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {kind} file {}: {reason}", path.display())]
    Invalid {
        kind: ArtifactKind,
        path: PathBuf,
        reason: String,
    },
}

impl ArtifactError {
    /// The artifact this error is about.
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Missing { kind, .. }
            | Self::Read { kind, .. }
            | Self::Parse { kind, .. }
            | Self::Invalid { kind, .. } => *kind,
        }
    }

    /// Path of the offending file.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Missing { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Invalid { path, .. } => path,
        }
    }
}

/// Locations of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub input_scaler: PathBuf,
    pub output_scaler: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            input_scaler: dir.join(INPUT_SCALER_FILE),
            output_scaler: dir.join(OUTPUT_SCALER_FILE),
        }
    }

    fn entries(&self) -> [(ArtifactKind, &Path); 3] {
        [
            (ArtifactKind::Model, self.model.as_path()),
            (ArtifactKind::InputScaler, self.input_scaler.as_path()),
            (ArtifactKind::OutputScaler, self.output_scaler.as_path()),
        ]
    }
}

/// The deserialized artifacts, immutable and shared read-only.
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub model: Arc<DenseNetwork>,
    pub input_scaler: Arc<FittedScaler>,
    pub output_scaler: Arc<FittedScaler>,
}

/// Load all three artifacts.
///
/// Existence of every file is checked first, in the order model, input scaler,
/// output scaler, so a missing file is reported before any parsing starts.
///
/// # Errors
/// Returns `ArtifactError` for the first file that is missing, unreadable or invalid.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<LoadedArtifacts, ArtifactError> {
    for (kind, path) in paths.entries() {
        if !path.is_file() {
            tracing::error!("{} file not found at {:?}", kind, path);
            return Err(ArtifactError::Missing {
                kind,
                path: path.to_path_buf(),
            });
        }
    }

    let export: ExportedDenseNetwork = read_json(ArtifactKind::Model, &paths.model)?;
    let model = DenseNetwork::try_from(export).map_err(|reason| ArtifactError::Invalid {
        kind: ArtifactKind::Model,
        path: paths.model.clone(),
        reason,
    })?;
    if model.output_dim() != 1 {
        return Err(ArtifactError::Invalid {
            kind: ArtifactKind::Model,
            path: paths.model.clone(),
            reason: format!(
                "final layer has {} units, expected a single output",
                model.output_dim()
            ),
        });
    }
    tracing::info!(
        "Loaded model {:?} from {:?} (layers={}, params={}, inputs={})",
        model.name(),
        paths.model,
        model.layers().len(),
        model.parameter_count(),
        model.input_dim()
    );

    let input_scaler = load_scaler(ArtifactKind::InputScaler, &paths.input_scaler)?;
    let output_scaler = load_scaler(ArtifactKind::OutputScaler, &paths.output_scaler)?;

    warn_on_layout_mismatch(&model, &input_scaler, &output_scaler);

    Ok(LoadedArtifacts {
        model: Arc::new(model),
        input_scaler: Arc::new(input_scaler),
        output_scaler: Arc::new(output_scaler),
    })
}

fn read_json<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

fn load_scaler(kind: ArtifactKind, path: &Path) -> Result<FittedScaler, ArtifactError> {
    let scaler: FittedScaler = read_json(kind, path)?;
    scaler.validate().map_err(|reason| ArtifactError::Invalid {
        kind,
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::info!(
        "Loaded {} ({}, n_features={}) from {:?}",
        kind,
        scaler.kind(),
        scaler.n_features(),
        path
    );
    Ok(scaler)
}

/// Dimension and column-order disagreements only surface as prediction errors,
/// so flag them in the log as soon as the artifacts are read.
fn warn_on_layout_mismatch(model: &DenseNetwork, sc_x: &FittedScaler, sc_y: &FittedScaler) {
    if sc_x.n_features() != FEATURE_COUNT {
        tracing::warn!(
            "Input scaler expects {} features, the form provides {}",
            sc_x.n_features(),
            FEATURE_COUNT
        );
    }
    if model.input_dim() != sc_x.n_features() {
        tracing::warn!(
            "Model takes {} inputs but the input scaler produces {}",
            model.input_dim(),
            sc_x.n_features()
        );
    }
    if sc_y.n_features() != model.output_dim() {
        tracing::warn!(
            "Output scaler expects {} columns, the model produces {}",
            sc_y.n_features(),
            model.output_dim()
        );
    }
    if let Some(names) = model.feature_names() {
        let expected = feature::feature_names();
        if names.iter().map(String::as_str).ne(expected.iter().copied()) {
            tracing::warn!("Model feature_names differ from the form's feature order");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MODEL_JSON: &str = r#"{
        "layers": [
            {"activation": "relu", "kernel": [[1.0], [1.0]], "bias": [0.0]}
        ]
    }"#;
    const SCALER_JSON: &str = r#"{"kind": "standard", "mean": [0.0, 0.0], "scale": [1.0, 1.0]}"#;
    const TARGET_JSON: &str = r#"{"kind": "min_max", "min": [0.0], "scale": [0.01]}"#;

    fn write_all(dir: &Path) {
        std::fs::write(dir.join(MODEL_FILE), MODEL_JSON).expect("write model");
        std::fs::write(dir.join(INPUT_SCALER_FILE), SCALER_JSON).expect("write sc_X");
        std::fs::write(dir.join(OUTPUT_SCALER_FILE), TARGET_JSON).expect("write sc_y");
    }

    #[test]
    fn test_paths_in_dir() {
        let paths = ArtifactPaths::in_dir("models");
        assert_eq!(paths.model, Path::new("models/spfnet_model.json"));
        assert_eq!(paths.input_scaler, Path::new("models/sc_X.json"));
        assert_eq!(paths.output_scaler, Path::new("models/sc_y.json"));
    }

    #[test]
    fn test_load_all() {
        let dir = tempdir().expect("tempdir");
        write_all(dir.path());

        let loaded = load_artifacts(&ArtifactPaths::in_dir(dir.path())).expect("Should load");
        assert_eq!(loaded.model.input_dim(), 2);
        assert_eq!(loaded.input_scaler.kind(), "standard");
        assert_eq!(loaded.output_scaler.kind(), "min_max");
    }

    #[test]
    fn test_each_missing_file_is_named() {
        for (kind, file) in [
            (ArtifactKind::Model, MODEL_FILE),
            (ArtifactKind::InputScaler, INPUT_SCALER_FILE),
            (ArtifactKind::OutputScaler, OUTPUT_SCALER_FILE),
        ] {
            let dir = tempdir().expect("tempdir");
            write_all(dir.path());
            std::fs::remove_file(dir.path().join(file)).expect("remove");

            let err = load_artifacts(&ArtifactPaths::in_dir(dir.path()))
                .expect_err("Should fail");
            assert_eq!(err.kind(), kind);
            assert!(matches!(err, ArtifactError::Missing { .. }));
            assert!(err.to_string().contains(file), "{err}");
        }
    }

    #[test]
    fn test_missing_checked_before_parsing() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join(MODEL_FILE), "not json").expect("write");
        std::fs::write(dir.path().join(INPUT_SCALER_FILE), SCALER_JSON).expect("write");

        let err = load_artifacts(&ArtifactPaths::in_dir(dir.path())).expect_err("Should fail");
        assert_eq!(err.kind(), ArtifactKind::OutputScaler);
        assert!(matches!(err, ArtifactError::Missing { .. }));
    }

    #[test]
    fn test_corrupt_model_is_parse_error() {
        let dir = tempdir().expect("tempdir");
        write_all(dir.path());
        std::fs::write(dir.path().join(MODEL_FILE), "{\"layers\": [").expect("write");

        let err = load_artifacts(&ArtifactPaths::in_dir(dir.path())).expect_err("Should fail");
        assert!(matches!(err, ArtifactError::Parse { kind: ArtifactKind::Model, .. }));
    }

    #[test]
    fn test_multi_output_model_is_invalid() {
        let dir = tempdir().expect("tempdir");
        write_all(dir.path());
        std::fs::write(
            dir.path().join(MODEL_FILE),
            r#"{"layers": [{"kernel": [[1.0, 1.0]], "bias": [0.0, 0.0]}]}"#,
        )
        .expect("write");

        let err = load_artifacts(&ArtifactPaths::in_dir(dir.path())).expect_err("Should fail");
        assert!(matches!(err, ArtifactError::Invalid { kind: ArtifactKind::Model, .. }));
    }

    #[test]
    fn test_zero_scale_is_invalid() {
        let dir = tempdir().expect("tempdir");
        write_all(dir.path());
        std::fs::write(
            dir.path().join(OUTPUT_SCALER_FILE),
            r#"{"kind": "min_max", "min": [0.0], "scale": [0.0]}"#,
        )
        .expect("write");

        let err = load_artifacts(&ArtifactPaths::in_dir(dir.path())).expect_err("Should fail");
        assert!(matches!(
            err,
            ArtifactError::Invalid { kind: ArtifactKind::OutputScaler, .. }
        ));
        assert!(err.path().ends_with(OUTPUT_SCALER_FILE));
    }
}
