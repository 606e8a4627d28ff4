//! Hand scoring.
//!
//! Scores the best 5-card hand out of 5, 6 or 7 known cards. The result is a
//! [`HandStrength`]: hand category and up to five tie-break ranks packed into
//! one base-15 integer, category in the most significant digit, so strengths
//! compare with plain integer ordering.
//!
//! The 6- and 7-card scorers search every 5-card subset exhaustively
//! (6 and 21 evaluations).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::error::{Error, Result};

/// Represents the ranking of a poker hand, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No made hand, only high card.
    #[serde(rename = "High Card")]
    HighCard,
    /// Two cards of the same rank.
    Pair,
    /// Two different pairs.
    #[serde(rename = "Two Pair")]
    TwoPair,
    /// Three cards of the same rank.
    #[serde(rename = "Three of a Kind")]
    ThreeOfAKind,
    /// Five consecutive ranks of mixed suits.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind plus a pair.
    #[serde(rename = "Full House")]
    FullHouse,
    /// Four cards of the same rank.
    #[serde(rename = "Four of a Kind")]
    FourOfAKind,
    /// Five consecutive ranks of the same suit.
    #[serde(rename = "Straight Flush")]
    StraightFlush,
}

impl HandCategory {
    pub const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::Pair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const BASE: u32 = 15;
const TIEBREAKS: usize = 5;
const CATEGORY_PLACE: u32 = BASE.pow(TIEBREAKS as u32);

/// Totally ordered strength of a 5-card hand.
///
/// Layout is `[category][r1][r2][r3][r4][r5]` in base 15, unused tie-break
/// slots zero. Two hands with the same category and tie-break ranks are
/// exactly equal regardless of suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HandStrength(u32);

impl HandStrength {
    /// Packs a category and its tie-break ranks, most significant first.
    pub fn new(category: HandCategory, tiebreaks: &[u8]) -> Self {
        debug_assert!(tiebreaks.len() <= TIEBREAKS);
        debug_assert!(tiebreaks.iter().all(|&r| (2..=14).contains(&r)));
        let packed = (0..TIEBREAKS)
            .map(|i| tiebreaks.get(i).copied().unwrap_or(0) as u32)
            .fold(category as u32, |acc, r| acc * BASE + r);
        HandStrength(packed)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn category(&self) -> HandCategory {
        HandCategory::ALL[(self.0 / CATEGORY_PLACE) as usize]
    }

    /// Tie-break ranks, most significant first. A wheel reports `[Five]`.
    pub fn tiebreaks(&self) -> Vec<Rank> {
        (0..TIEBREAKS as u32)
            .rev()
            .map(|place| ((self.0 / BASE.pow(place)) % BASE) as u8)
            .map_while(Rank::from_value)
            .collect()
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: Vec<&str> = self.tiebreaks().iter().map(|r| r.symbol()).collect();
        write!(f, "{} ({})", self.category(), ranks.join(" "))
    }
}

/// Scores exactly five cards.
pub fn score_five(cards: &[Card; 5]) -> HandStrength {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.rank().value() as usize] += 1;
    }

    // (multiplicity, rank) sorted by multiplicity then rank, both descending
    let mut groups = [(0u8, 0u8); 5];
    let mut len = 0;
    for rank in (2..=14u8).rev() {
        if counts[rank as usize] > 0 {
            groups[len] = (counts[rank as usize], rank);
            len += 1;
        }
    }
    let groups = &mut groups[..len];
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut shape = [0u8; 5];
    let mut ranks = [0u8; 5];
    for (i, &(count, rank)) in groups.iter().enumerate() {
        shape[i] = count;
        ranks[i] = rank;
    }
    let (shape, ranks) = (&shape[..len], &ranks[..len]);

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight = straight_high(ranks);

    match (is_flush, straight, shape) {
        (true, Some(high), _) => HandStrength::new(HandCategory::StraightFlush, &[high]),
        (_, _, [4, 1]) => HandStrength::new(HandCategory::FourOfAKind, ranks),
        (_, _, [3, 2]) => HandStrength::new(HandCategory::FullHouse, ranks),
        (true, None, _) => HandStrength::new(HandCategory::Flush, ranks),
        (false, Some(high), _) => HandStrength::new(HandCategory::Straight, &[high]),
        (_, _, [3, 1, 1]) => HandStrength::new(HandCategory::ThreeOfAKind, ranks),
        (_, _, [2, 2, 1]) => HandStrength::new(HandCategory::TwoPair, ranks),
        (_, _, [2, 1, 1, 1]) => HandStrength::new(HandCategory::Pair, ranks),
        _ => HandStrength::new(HandCategory::HighCard, ranks),
    }
}

/// High card of a straight over five distinct ranks given high to low.
/// The wheel (A-5-4-3-2) is a five-high straight.
fn straight_high(ranks: &[u8]) -> Option<u8> {
    match ranks {
        [14, 5, 4, 3, 2] => Some(5),
        [high, .., low] if ranks.len() == 5 && high - low == 4 => Some(*high),
        _ => None,
    }
}

/// Best hand out of six cards: drop each card once.
pub fn score_six(cards: &[Card; 6]) -> HandStrength {
    best_of_subsets(cards)
}

/// Best hand out of seven cards: all 21 five-card subsets.
pub fn score_seven(cards: &[Card; 7]) -> HandStrength {
    best_of_subsets(cards)
}

/// Slice entry point for callers that only know the count at runtime.
pub fn score_best(cards: &[Card]) -> Result<HandStrength> {
    match cards.len() {
        5 => Ok(score_five(&five(cards))),
        6 | 7 => Ok(best_of_subsets(cards)),
        n => Err(Error::InvalidArity(n)),
    }
}

fn five(cards: &[Card]) -> [Card; 5] {
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

fn best_of_subsets(cards: &[Card]) -> HandStrength {
    FiveCardSubsets::new(cards)
        .map(|subset| score_five(&subset))
        .max()
        .unwrap_or(HandStrength(0))
}

/// Every 5-card subset of up to seven cards, in lexicographic index order.
///
/// Yields `C(n, 5)` subsets: 1, 6 or 21 for 5, 6 or 7 cards.
pub struct FiveCardSubsets<'a> {
    cards: &'a [Card],
    idx: [usize; 5],
    done: bool,
}

impl<'a> FiveCardSubsets<'a> {
    pub fn new(cards: &'a [Card]) -> Self {
        Self {
            cards,
            idx: [0, 1, 2, 3, 4],
            done: cards.len() < 5,
        }
    }
}

impl Iterator for FiveCardSubsets<'_> {
    type Item = [Card; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let subset = self.idx.map(|i| self.cards[i]);

        // advance to the next combination
        let n = self.cards.len();
        let mut i = 5;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.idx[i] < n - 5 + i {
                self.idx[i] += 1;
                for j in i + 1..5 {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                break;
            }
        }
        Some(subset)
    }
}
