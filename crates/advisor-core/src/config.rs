//! Simulation settings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tuning knobs for the Monte Carlo simulator.
///
/// `workers` is the number of independent trial streams, each with its own
/// seeded generator and deck copy. It is deliberately not tied to the number
/// of CPU cores: rayon decides how streams map onto threads, so the same seed
/// gives the same estimate on any machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Trials used when the caller does not ask for a specific count.
    pub trials: usize,
    /// Lowest trial count accepted; fewer gives unusably noisy estimates.
    pub min_trials: usize,
    /// Independent trial streams.
    pub workers: usize,
    /// Trials between cancellation checks and observer reports.
    pub batch_size: usize,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            trials: 30_000,
            min_trials: 1_000,
            workers: 8,
            batch_size: 1_000,
        }
    }
}

impl EquityConfig {
    /// Decodes a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.normalized())
    }

    /// Requested trials raised to the floor.
    pub fn clamp_trials(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.trials).max(self.min_trials)
    }

    /// Rejects trial counts below the floor.
    pub fn check_trials(&self, requested: usize) -> Result<()> {
        if requested < self.min_trials {
            return Err(Error::InsufficientTrials {
                requested,
                minimum: self.min_trials,
            });
        }
        Ok(())
    }

    /// Zero workers or a zero batch size would stall the simulator, and a zero
    /// trial floor would let an empty run through.
    pub fn normalized(mut self) -> Self {
        self.min_trials = self.min_trials.max(1);
        self.workers = self.workers.max(1);
        self.batch_size = self.batch_size.max(1);
        self
    }
}
