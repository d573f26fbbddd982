//! Artifact check utility for Solarcast.
//!
//! Loads the model and both scalers from a directory, prints their shapes and
//! runs one prediction with every feature at its mean.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin check_artifacts -- [model_dir]
//! ```
//!
//! Without an argument the directory comes from `SOLARCAST_MODEL_DIR` (default `models`).

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use solarcast::adapters::artifacts::{load_artifacts, ArtifactPaths};
use solarcast::application::PredictionService;
use solarcast::config::AppConfig;
use solarcast::domain::InputVector;
use solarcast::ports::Scaler;

fn usage() -> String {
    "Usage: check_artifacts [model_dir]".to_string()
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let dir = match args.next() {
        Some(arg) if arg == "-h" || arg == "--help" => bail!(usage()),
        Some(arg) => PathBuf::from(arg),
        None => AppConfig::from_env().model_dir,
    };
    if args.next().is_some() {
        bail!(usage());
    }
    Ok(dir)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let dir = parse_args()?;
    let artifacts = load_artifacts(&ArtifactPaths::in_dir(&dir))
        .with_context(|| format!("Failed to load artifacts from {}", dir.display()))?;

    let model = &artifacts.model;
    println!("Model: {}", model.name());
    for (i, layer) in model.layers().iter().enumerate() {
        println!(
            "  layer {i}: {} -> {} ({:?})",
            layer.input_dim(),
            layer.units(),
            layer.activation()
        );
    }
    println!("  parameters: {}", model.parameter_count());
    println!(
        "Scaler X: {} ({} features)",
        artifacts.input_scaler.kind(),
        artifacts.input_scaler.n_features()
    );
    println!(
        "Scaler Y: {} ({} features)",
        artifacts.output_scaler.kind(),
        artifacts.output_scaler.n_features()
    );

    let service = PredictionService::new(
        artifacts.model.clone(),
        artifacts.input_scaler.clone(),
        artifacts.output_scaler.clone(),
    );
    let forecast = service
        .predict(&InputVector::defaults())
        .context("All-means prediction failed")?;
    println!("All-means forecast: {forecast}");

    Ok(())
}
