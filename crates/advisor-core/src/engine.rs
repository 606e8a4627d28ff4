//! The `advise` entry point.
//!
//! Validates the deal, runs the equity simulation, turns the estimate into
//! an action and attaches the made-hand/draw analysis. Each call builds a
//! fresh [`AdviceResult`] owned by the caller; nothing is kept between calls
//! except whatever random generator the caller passes in.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::advice::{Action, recommend};
use crate::cards::{Board, Card, Hole, Street, known_cards};
use crate::config::EquityConfig;
use crate::draws::{PossibleHands, possible_hands};
use crate::equity::{EquityEstimate, Simulator, check_opponents};
use crate::error::{Error, Result};
use crate::observer::{CancelToken, SimulationObserver};

/// Optional knobs for a single call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviseOptions {
    /// Trial count; raised to the configured floor when lower.
    pub trials: Option<usize>,
    /// Pot before the hero acts.
    pub pot: Option<f64>,
    /// Amount the hero must put in to continue (0 when checking is free).
    pub to_call: Option<f64>,
}

/// Everything the advisor has to say about one spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceResult {
    /// Pot share in percent, ties split, one decimal place.
    pub equity_pct: f64,
    pub action: Action,
    pub rationale: String,
    pub street: Street,
    pub possible_hands: PossibleHands,
    /// Raw simulation output behind `equity_pct`.
    pub estimate: EquityEstimate,
}

/// Engine front door holding the simulation settings and optional hooks.
pub struct Advisor<'a> {
    simulator: Simulator<'a>,
}

impl Default for Advisor<'_> {
    fn default() -> Self {
        Self::new(EquityConfig::default())
    }
}

impl<'a> Advisor<'a> {
    pub fn new(config: EquityConfig) -> Self {
        Self {
            simulator: Simulator::new(config),
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn SimulationObserver) -> Self {
        self.simulator = self.simulator.with_observer(observer);
        self
    }

    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.simulator = self.simulator.with_cancel(cancel);
        self
    }

    pub fn config(&self) -> &EquityConfig {
        self.simulator.config()
    }

    /// Advises with the thread-local generator.
    pub fn advise(
        &self,
        hole: [Card; 2],
        board: &[Card],
        opponents: usize,
        options: &AdviseOptions,
    ) -> Result<AdviceResult> {
        self.advise_with_rng(hole, board, opponents, options, &mut rand::rng())
    }

    /// Advises drawing all randomness from `rng`.
    pub fn advise_with_rng<R: Rng + ?Sized>(
        &self,
        hole: [Card; 2],
        board: &[Card],
        opponents: usize,
        options: &AdviseOptions,
        rng: &mut R,
    ) -> Result<AdviceResult> {
        let board = Board::new(board.to_vec())?;
        let hole = Hole::new(hole[0], hole[1])?;
        known_cards(&hole, &board)?;
        check_opponents(opponents)?;
        let pot = checked_amount("pot", options.pot)?;
        let to_call = checked_amount("to_call", options.to_call)?;

        let trials = self.config().clamp_trials(options.trials);
        if options.trials.is_some_and(|requested| requested < trials) {
            tracing::debug!(requested = options.trials, trials, "raised trial count to floor");
        }

        let street = board.street();
        let estimate = self.simulator.estimate(&hole, &board, opponents, trials, rng)?;
        let equity_pct = estimate.equity_pct();
        let recommendation = recommend(equity_pct, street, opponents, pot, to_call);
        let possible_hands = possible_hands(&hole, &board)?;

        tracing::debug!(
            card1 = %hole.0,
            card2 = %hole.1,
            street = %street,
            opponents,
            equity = equity_pct,
            action = %recommendation.action,
            draws = possible_hands.draws.len(),
            "advice computed"
        );

        Ok(AdviceResult {
            equity_pct: round1(equity_pct),
            action: recommendation.action,
            rationale: format!("{} (trials={})", recommendation.rationale, estimate.trials),
            street,
            possible_hands,
            estimate,
        })
    }
}

/// Advises with default settings and the thread-local generator.
pub fn advise(
    hole: [Card; 2],
    board: &[Card],
    opponents: usize,
    options: &AdviseOptions,
) -> Result<AdviceResult> {
    Advisor::default().advise(hole, board, opponents, options)
}

fn checked_amount(field: &'static str, amount: Option<f64>) -> Result<Option<f64>> {
    match amount {
        Some(value) if !value.is_finite() || value < 0.0 => Err(Error::InvalidAmount { field, value }),
        other => Ok(other),
    }
}

fn round1(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}
