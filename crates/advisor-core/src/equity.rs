//! Monte Carlo equity simulation.
//!
//! Each trial shuffles a private copy of the deck (known cards removed),
//! completes the board, deals two cards to every villain in order, and
//! compares 7-card strengths. The hero wins a trial only when holding the
//! unique best hand and ties when sharing the best hand with at least one
//! villain. A tie among villains that beat the hero is a plain loss.
//!
//! Trials are split over independent streams ([`EquityConfig::workers`]),
//! each seeded from the caller's generator and run on rayon. Stream tallies
//! are summed at the end, so the estimate only depends on the seed, the
//! stream count and the trial count.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::cards::{Board, Card, Deck, Hole, known_cards};
use crate::config::EquityConfig;
use crate::error::{Error, Result};
use crate::hand::score_seven;
use crate::observer::{BatchReport, CancelToken, SimulationObserver};

/// Most villains a single deck can seat once the board is complete:
/// 52 - 2 hole - 5 board = 45 cards, two per villain.
pub const MAX_OPPONENTS: usize = 22;

/// Win and tie fractions over the completed trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityEstimate {
    pub win: f64,
    pub tie: f64,
    pub trials: usize,
}

impl EquityEstimate {
    /// Pot share in percent, ties counted as half a pot.
    pub fn equity_pct(&self) -> f64 {
        self.win * 100.0 + self.tie * 50.0
    }
}

/// Result of a single showdown from the hero's seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Tie,
    Loss,
}

/// Partial sums of a run. Merging is associative and commutative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub wins: usize,
    pub ties: usize,
    pub trials: usize,
}

impl Tally {
    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
        }
    }

    fn record(&mut self, outcome: Outcome) {
        self.trials += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => {}
        }
    }
}

/// Everything a trial needs, shared read-only between streams.
struct Deal<'a> {
    hole: [Card; 2],
    board: &'a [Card],
    deck: &'a [Card],
    opponents: usize,
}

impl Deal<'_> {
    /// Plays out one trial from a shuffled deck: runout first, then villains.
    fn showdown(&self, deck: &[Card]) -> Outcome {
        let known = self.board.len();
        let full: [Card; 5] =
            std::array::from_fn(|i| if i < known { self.board[i] } else { deck[i - known] });
        let dealt = &deck[5 - known..];

        let hero = score_seven(&seven(self.hole, &full));
        let mut best = hero;
        let mut at_best = 1;
        for villain in dealt.chunks_exact(2).take(self.opponents) {
            let strength = score_seven(&seven([villain[0], villain[1]], &full));
            if strength > best {
                best = strength;
                at_best = 1;
            } else if strength == best {
                at_best += 1;
            }
        }

        match (best == hero, at_best) {
            (true, 1) => Outcome::Win,
            (true, _) => Outcome::Tie,
            (false, _) => Outcome::Loss,
        }
    }
}

fn seven(hole: [Card; 2], board: &[Card; 5]) -> [Card; 7] {
    [hole[0], hole[1], board[0], board[1], board[2], board[3], board[4]]
}

/// Checks the opponent count against what one deck can seat.
pub fn check_opponents(opponents: usize) -> Result<()> {
    if !(1..=MAX_OPPONENTS).contains(&opponents) {
        return Err(Error::InvalidOpponentCount {
            opponents,
            max: MAX_OPPONENTS,
        });
    }
    Ok(())
}

/// Monte Carlo runner with optional progress reporting and cancellation.
pub struct Simulator<'a> {
    config: EquityConfig,
    observer: Option<&'a dyn SimulationObserver>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> Simulator<'a> {
    pub fn new(config: EquityConfig) -> Self {
        Self {
            config: config.normalized(),
            observer: None,
            cancel: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn SimulationObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Estimates win and tie fractions against `opponents` random hands.
    ///
    /// `trials` below [`EquityConfig::min_trials`] is rejected. Stream seeds
    /// are drawn from `rng` in stream order, so a seeded generator makes the
    /// whole estimate reproducible.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        hole: &Hole,
        board: &Board,
        opponents: usize,
        trials: usize,
        rng: &mut R,
    ) -> Result<EquityEstimate> {
        self.config.check_trials(trials)?;
        check_opponents(opponents)?;
        let known = known_cards(hole, board)?;
        let deck = Deck::without(&known)?;

        let deal = Deal {
            hole: hole.cards(),
            board: board.cards(),
            deck: deck.cards(),
            opponents,
        };

        let streams = self.config.workers.min(trials);
        let seeds: Vec<u64> = (0..streams).map(|_| rng.next_u64()).collect();
        let tally = seeds
            .into_par_iter()
            .enumerate()
            .map(|(worker, seed)| {
                let share = trials / streams + usize::from(worker < trials % streams);
                self.run_stream(worker, seed, share, &deal)
            })
            .reduce(Tally::default, Tally::merge);

        tracing::debug!(
            opponents,
            street = %board.street(),
            requested = trials,
            trials = tally.trials,
            wins = tally.wins,
            ties = tally.ties,
            "equity simulation finished"
        );

        if tally.trials == 0 {
            return Err(Error::Cancelled);
        }
        Ok(EquityEstimate {
            win: tally.wins as f64 / tally.trials as f64,
            tie: tally.ties as f64 / tally.trials as f64,
            trials: tally.trials,
        })
    }

    fn run_stream(&self, worker: usize, seed: u64, share: usize, deal: &Deal) -> Tally {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = deal.deck.to_vec();
        let mut total = Tally::default();

        while total.trials < share {
            if self.cancel.is_some_and(CancelToken::is_cancelled) {
                break;
            }
            let mut batch = Tally::default();
            for _ in 0..self.config.batch_size.min(share - total.trials) {
                // every trial starts again from the canonical order
                deck.copy_from_slice(deal.deck);
                deck.shuffle(&mut rng);
                batch.record(deal.showdown(&deck));
            }
            total = total.merge(batch);

            if let Some(observer) = self.observer {
                observer.batch_finished(&BatchReport {
                    worker,
                    trials: batch.trials,
                    wins: batch.wins,
                    ties: batch.ties,
                    completed: total.trials,
                });
            }
        }
        total
    }
}

/// Runs a simulation with the default configuration.
pub fn estimate_equity<R: Rng + ?Sized>(
    hole: &Hole,
    board: &Board,
    opponents: usize,
    trials: usize,
    rng: &mut R,
) -> Result<EquityEstimate> {
    Simulator::new(EquityConfig::default()).estimate(hole, board, opponents, trials, rng)
}
