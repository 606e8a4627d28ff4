//! Optional hooks into a running simulation.
//!
//! Nothing here is required: the simulator runs fine with no observer and no
//! cancel token. Reports are emitted per batch, never per trial.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Progress of one worker after finishing a batch of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub worker: usize,
    /// Trials in this batch.
    pub trials: usize,
    pub wins: usize,
    pub ties: usize,
    /// Trials this worker has completed so far, this batch included.
    pub completed: usize,
}

/// Structured event sink for simulation progress.
///
/// Called concurrently from worker threads.
pub trait SimulationObserver: Send + Sync {
    fn batch_finished(&self, report: &BatchReport);
}

/// Forwards batch reports to `tracing` at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SimulationObserver for TracingObserver {
    fn batch_finished(&self, report: &BatchReport) {
        tracing::trace!(
            worker = report.worker,
            trials = report.trials,
            wins = report.wins,
            ties = report.ties,
            completed = report.completed,
            "equity batch finished"
        );
    }
}

/// Cooperative cancellation flag, checked between batches.
#[derive(Debug, Default, Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
