//! Error taxonomy for the advisor engine.
//!
//! Input-class failures (bad board length, duplicate cards, silly opponent
//! counts, too few trials) are returned as distinct variants so a front end
//! can report them precisely. [`Error::InvalidArity`] is the odd one out: it
//! only surfaces from the slice-based scorer entry point and means the caller
//! broke an internal invariant.

use thiserror::Error;

use crate::cards::Card;

/// Errors that can occur while building or evaluating a deal.
#[derive(Debug, Error)]
pub enum Error {
    /// Board length is not 0, 3, 4 or 5.
    #[error("board must have 0, 3, 4 or 5 cards (got {0})")]
    InvalidBoardLength(usize),

    /// Opponent count is zero, or larger than the remaining deck can seat.
    #[error("opponent count must be between 1 and {max} (got {opponents})")]
    InvalidOpponentCount { opponents: usize, max: usize },

    /// The same card appears twice across hole cards and board.
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),

    /// A token or index that does not name one of the 52 cards.
    #[error("invalid card: {0}")]
    InvalidCard(String),

    /// The scorer was handed a card count other than 5, 6 or 7.
    #[error("hand scorer needs 5, 6 or 7 cards (got {0})")]
    InvalidArity(usize),

    /// Trial count below the configured floor.
    #[error("at least {minimum} trials are required (got {requested})")]
    InsufficientTrials { requested: usize, minimum: usize },

    /// Pot or call amount that is negative or not a finite number.
    #[error("{field} must be a non-negative amount (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },

    /// The simulation was cancelled before a single trial completed.
    #[error("simulation cancelled before any trial completed")]
    Cancelled,

    /// Configuration could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
