//! Shared artifact fixture for integration tests.
//!
//! Network: 20 -> 4 (relu) -> 1 (linear). Input scaler centres every feature
//! on its mean, so the all-means row scales to zeros and the forecast is
//! `((0.4 + 0.3 + 0.2 + 0.1) * 0.5 + 0.3) / 0.001 = 800 KW`.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use solarcast::adapters::artifacts::{
    load_artifacts, ArtifactPaths, INPUT_SCALER_FILE, MODEL_FILE, OUTPUT_SCALER_FILE,
};
use solarcast::adapters::dense::DenseNetwork;
use solarcast::adapters::scaler::FittedScaler;
use solarcast::application::PredictionService;
use solarcast::domain::{FEATURES, FEATURE_COUNT};

pub const HIDDEN_UNITS: usize = 4;
pub const ALL_MEANS_KW: f64 = 800.0;

pub fn write_fixture(dir: &Path) {
    let kernel: Vec<Vec<f64>> = (0..FEATURE_COUNT)
        .map(|i| {
            (0..HIDDEN_UNITS)
                .map(|j| ((i + j) % 5) as f64 * 0.05 - 0.1)
                .collect()
        })
        .collect();
    let names: Vec<&str> = FEATURES.iter().map(|d| d.name).collect();
    let hidden_bias = vec![0.5; HIDDEN_UNITS];
    let means: Vec<f64> = FEATURES.iter().map(|d| d.mean).collect();
    let scales: Vec<f64> = FEATURES.iter().map(|d| (d.max - d.min) / 4.0).collect();

    let model = json!({
        "name": "spfnet",
        "feature_names": names,
        "layers": [
            { "activation": "relu", "kernel": kernel, "bias": hidden_bias },
            { "activation": "linear", "kernel": [[0.4], [0.3], [0.2], [0.1]], "bias": [0.3] }
        ]
    });
    let sc_x = json!({
        "kind": "standard",
        "mean": means,
        "scale": scales,
    });
    let sc_y = json!({ "kind": "min_max", "min": [0.0], "scale": [0.001] });

    std::fs::write(dir.join(MODEL_FILE), model.to_string()).unwrap();
    std::fs::write(dir.join(INPUT_SCALER_FILE), sc_x.to_string()).unwrap();
    std::fs::write(dir.join(OUTPUT_SCALER_FILE), sc_y.to_string()).unwrap();
}

pub fn fixture_service(dir: &Path) -> PredictionService<DenseNetwork, FittedScaler> {
    write_fixture(dir);
    let artifacts = load_artifacts(&ArtifactPaths::in_dir(dir)).unwrap();
    PredictionService::new(
        Arc::clone(&artifacts.model),
        Arc::clone(&artifacts.input_scaler),
        Arc::clone(&artifacts.output_scaler),
    )
}
