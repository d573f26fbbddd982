//! Startup failures when artifacts are missing or malformed.

mod common;

use tempfile::tempdir;

use solarcast::adapters::artifacts::{
    load_artifacts, ArtifactPaths, INPUT_SCALER_FILE, MODEL_FILE, OUTPUT_SCALER_FILE,
};
use solarcast::adapters::ArtifactError;
use solarcast::config::AppConfig;
use solarcast::tui::App;
use solarcast::SolarcastError;

#[test]
fn test_missing_file_is_named() {
    for file in [MODEL_FILE, INPUT_SCALER_FILE, OUTPUT_SCALER_FILE] {
        let dir = tempdir().unwrap();
        common::write_fixture(dir.path());
        std::fs::remove_file(dir.path().join(file)).unwrap();

        let err = load_artifacts(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { .. }));
        assert!(err.to_string().contains(file), "{err}");
    }
}

#[test]
fn test_app_refuses_to_start_without_artifacts() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        model_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    match App::new(&config) {
        Err(SolarcastError::Artifact(e)) => {
            assert!(e.to_string().starts_with("Model file not found"), "{e}");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("app started without artifacts"),
    }
}

#[test]
fn test_malformed_scaler_is_fatal() {
    let dir = tempdir().unwrap();
    common::write_fixture(dir.path());
    std::fs::write(
        dir.path().join(INPUT_SCALER_FILE),
        r#"{"kind": "standard", "mean": [0.0], "scale": [0.0]}"#,
    )
    .unwrap();

    let err = load_artifacts(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, ArtifactError::Invalid { .. }), "{err}");
}

#[test]
fn test_binary_reports_missing_artifact_once() {
    let dir = tempdir().unwrap();
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_solarcast"))
        .env("SOLARCAST_MODEL_DIR", dir.path())
        .env("SOLARCAST_LOG_MODE", "stdout")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Model file not found").count(), 1, "{stderr}");
}
