//! Background prediction worker.
//!
//! Runs the prediction pipeline off the UI thread so the main loop keeps
//! redrawing while the forward pass runs.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::application::PredictionService;
use crate::domain::{Forecast, InputVector, PredictionError};
use crate::ports::{Regressor, Scaler};

/// Progress updates from the prediction worker.
#[derive(Debug, Clone)]
pub enum PredictionProgress {
    /// Pipeline started
    Computing,
    /// Prediction complete
    Complete(Forecast),
    /// Error occurred during prediction
    Error(String),
}

/// Handle to a running prediction worker.
pub struct PredictionWorkerHandle {
    progress_rx: Receiver<PredictionProgress>,
    _handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    ///
    /// A worker that hangs up without reporting a result (it panicked) is
    /// turned into an `Error` update.
    #[must_use]
    pub fn try_recv(&self) -> Option<PredictionProgress> {
        match self.progress_rx.try_recv() {
            Ok(progress) => Some(progress),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(PredictionProgress::Error(
                PredictionError::Worker("prediction worker terminated unexpectedly".to_string())
                    .to_string(),
            )),
        }
    }
}

/// Prediction worker that runs the pipeline in the background.
pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a background prediction task.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<R, S>(
        service: PredictionService<R, S>,
        input: InputVector,
    ) -> PredictionWorkerHandle
    where
        R: Regressor + 'static,
        S: Scaler + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_with_progress(&service, &input, &tx);
        });

        PredictionWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_with_progress<R, S>(
        service: &PredictionService<R, S>,
        input: &InputVector,
        tx: &Sender<PredictionProgress>,
    ) where
        R: Regressor,
        S: Scaler,
    {
        let _ = tx.send(PredictionProgress::Computing);

        let update = match service.predict(input) {
            Ok(forecast) => PredictionProgress::Complete(forecast),
            Err(e) => {
                tracing::warn!("Prediction failed: {}", e);
                PredictionProgress::Error(e.to_string())
            }
        };
        let _ = tx.send(update);
    }
}
