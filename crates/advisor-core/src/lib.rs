//! Hold'em decision support.
//!
//! Estimates a hand's equity against a number of random opponents by Monte
//! Carlo simulation, recommends fold/check/call/raise from that equity, and
//! lists the made hands and one-card draws behind it.
//!
//! ```no_run
//! use advisor_core::{AdviseOptions, advise};
//!
//! let hole = ["Ah".parse().unwrap(), "Kd".parse().unwrap()];
//! let board = ["7c".parse().unwrap(), "8c".parse().unwrap(), "Qd".parse().unwrap()];
//! let options = AdviseOptions { pot: Some(100.0), to_call: Some(50.0), ..Default::default() };
//! let result = advise(hole, &board, 2, &options).unwrap();
//! println!("{}% -> {}", result.equity_pct, result.action);
//! ```

pub mod advice;
pub mod cards;
pub mod config;
pub mod draws;
pub mod engine;
pub mod equity;
pub mod error;
pub mod hand;
pub mod observer;

pub use advice::{Action, Recommendation, recommend};
pub use cards::{Board, Card, Deck, Hole, Rank, Street, Suit, build_deck};
pub use config::EquityConfig;
pub use draws::{Draw, DrawKind, PossibleHands};
pub use engine::{AdviceResult, AdviseOptions, Advisor, advise};
pub use equity::{EquityEstimate, Simulator, estimate_equity};
pub use error::{Error, Result};
pub use hand::{HandCategory, HandStrength, score_five, score_seven, score_six};
pub use observer::{BatchReport, CancelToken, SimulationObserver, TracingObserver};
