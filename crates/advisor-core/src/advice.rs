//! Action recommendation.
//!
//! A single pure rule: pot odds when both pot and call amount are known,
//! fixed equity bands that tighten with more opponents otherwise. Every
//! rationale names the threshold it was judged against.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Street;

/// Equity slack when comparing against the break-even threshold.
const EPSILON: f64 = 1e-9;

/// Recommended action for the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise,
}

impl Action {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::Check => "Check",
            Action::Call => "Call",
            Action::Raise => "Raise",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An action together with a short justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub action: Action,
    pub rationale: String,
}

impl Recommendation {
    fn new(action: Action, rationale: String) -> Self {
        Self { action, rationale }
    }
}

/// Break-even equity in percent for calling `to_call` into `pot`.
pub fn call_threshold(pot: f64, to_call: f64) -> f64 {
    to_call / (pot + to_call) * 100.0
}

/// Maps equity (0–100) and table context to an action.
///
/// Pot odds are only used when both `pot` and `to_call` are given; a zero
/// call amount short-circuits to a check before any threshold math.
pub fn recommend(
    equity_pct: f64,
    street: Street,
    opponents: usize,
    pot: Option<f64>,
    to_call: Option<f64>,
) -> Recommendation {
    let extra = opponents.saturating_sub(1) as f64;

    let (Some(pot), Some(to_call)) = (pot, to_call) else {
        let raise_at = 60.0 + 5.0 * extra;
        let call_at = 40.0 + 5.0 * extra;
        let players = opponents + 1;
        return if equity_pct >= raise_at {
            Recommendation::new(
                Action::Raise,
                format!("Equity {equity_pct:.1}% >= {raise_at:.0}% for {players}-way."),
            )
        } else if equity_pct >= call_at {
            Recommendation::new(
                Action::Call,
                format!("Equity {equity_pct:.1}% in the playable band (>= {call_at:.0}%)."),
            )
        } else {
            let action = match street {
                Street::Preflop => Action::Fold,
                _ => Action::Check,
            };
            Recommendation::new(
                action,
                format!(
                    "Equity {equity_pct:.1}% below conservative threshold {call_at:.0}% for {players}-way."
                ),
            )
        };
    };

    if to_call == 0.0 {
        return Recommendation::new(
            Action::Check,
            "No bet to call (call threshold 0.0%); checking realizes equity.".to_string(),
        );
    }

    let threshold = call_threshold(pot, to_call);
    if equity_pct + EPSILON < threshold {
        return Recommendation::new(
            Action::Fold,
            format!("Equity {equity_pct:.1}% < call threshold {threshold:.1}%."),
        );
    }

    // tighter value bar multiway
    let margin = 20.0 + (10.0 - 3.0 * opponents as f64).max(0.0);
    if equity_pct >= threshold + margin {
        Recommendation::new(
            Action::Raise,
            format!(
                "Strong edge: equity {equity_pct:.1}% clears call threshold {threshold:.1}% by >= {margin:.0}%."
            ),
        )
    } else {
        Recommendation::new(
            Action::Call,
            format!("Equity {equity_pct:.1}% clears call threshold {threshold:.1}%."),
        )
    }
}
