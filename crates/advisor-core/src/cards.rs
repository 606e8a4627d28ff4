//! Card and deck model.
//!
//! Cards are plain `Copy` values. A [`Deck`] is always built fresh from an
//! exclusion list in canonical rank-major order (`2♣ 2♦ 2♥ 2♠ 3♣ … A♠`);
//! simulation code shuffles private copies of it and never mutates a shared
//! one.
//!
//! # Examples
//!
//! ```
//! use advisor_core::cards::{Board, Card, Hole, Rank, Suit};
//!
//! let hole = Hole::new(Card(Rank::Ace, Suit::Hearts), Card(Rank::King, Suit::Hearts)).unwrap();
//! let board = Board::new(vec!["2h".parse().unwrap(), "7h".parse().unwrap(), "9c".parse().unwrap()]).unwrap();
//! assert_eq!(board.street().to_string(), "flop");
//! assert_eq!(hole.0.to_string(), "A♥");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Represents a card suit. Suits carry no ordering in hold'em.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in canonical deck order
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Returns the suit as a display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        }
    }

    /// Returns the lowercase letter used in card tokens (`c`, `d`, `h`, `s`)
    pub fn letter(&self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_letter(c: char) -> Option<Suit> {
        match c {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    fn index(&self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }
}

/// Represents a card rank (2-14, where 14 = Ace).
///
/// The ace also plays low in the wheel straight (A-2-3-4-5); that exception
/// is handled by the scorer, not by the ordering here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    /// All ranks from lowest to highest
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Face value, 2 through 14.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        match value {
            2..=14 => Some(Rank::ALL[(value - 2) as usize]),
            _ => None,
        }
    }

    /// Returns the rank as a display character
    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub fn from_symbol(c: char) -> Option<Rank> {
        Rank::ALL
            .into_iter()
            .find(|r| r.symbol().starts_with(c))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single playing card. Equality is by (rank, suit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card(pub Rank, pub Suit);

impl Card {
    pub fn rank(&self) -> Rank {
        self.0
    }

    pub fn suit(&self) -> Suit {
        self.1
    }

    /// Position in the canonical rank-major deck, 0..52.
    pub fn index(&self) -> u8 {
        (self.0.value() - 2) * 4 + self.1.index()
    }

    /// Compact token form, e.g. `"Ah"`.
    pub fn token(&self) -> String {
        format!("{}{}", self.0.symbol(), self.1.letter())
    }
}

/// Pretty form with suit symbol, e.g. `A♥`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.symbol(), self.1.symbol())
    }
}

impl TryFrom<u8> for Card {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        if index >= 52 {
            return Err(Error::InvalidCard(format!("index {index}")));
        }
        Ok(Card(Rank::ALL[(index / 4) as usize], Suit::ALL[(index % 4) as usize]))
    }
}

/// Parses the strict two-character token form (`"Ah"`, `"Tc"`).
impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => Rank::from_symbol(r)
                .zip(Suit::from_letter(su))
                .map(|(rank, suit)| Card(rank, suit))
                .ok_or_else(|| Error::InvalidCard(s.to_string())),
            _ => Err(Error::InvalidCard(s.to_string())),
        }
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.token()
    }
}

impl TryFrom<String> for Card {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// The cards still available once a set of known cards is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// All 52 cards in canonical order.
    pub fn full() -> Self {
        Deck(
            Rank::ALL
                .into_iter()
                .flat_map(|rank| Suit::ALL.map(|suit| Card(rank, suit)))
                .collect(),
        )
    }

    /// The full deck minus `excluded`, canonical order preserved.
    ///
    /// Rejects an exclusion list that names the same card twice.
    pub fn without(excluded: &[Card]) -> Result<Self> {
        let mut seen = 0u64;
        for card in excluded {
            let bit = 1u64 << card.index();
            if seen & bit != 0 {
                return Err(Error::DuplicateCard(*card));
            }
            seen |= bit;
        }
        let mut deck = Self::full();
        deck.0.retain(|c| seen & (1u64 << c.index()) == 0);
        Ok(deck)
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Convenience wrapper over [`Deck::without`].
pub fn build_deck(excluded: &[Card]) -> Result<Vec<Card>> {
    Deck::without(excluded).map(|deck| deck.0)
}

/// Represents a player's hole cards (2 private cards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hole(pub Card, pub Card);

impl Hole {
    pub fn new(a: Card, b: Card) -> Result<Self> {
        if a == b {
            return Err(Error::DuplicateCard(a));
        }
        Ok(Hole(a, b))
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

/// Betting round implied by the number of board cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn from_board_len(len: usize) -> Result<Street> {
        match len {
            0 => Ok(Street::Preflop),
            3 => Ok(Street::Flop),
            4 => Ok(Street::Turn),
            5 => Ok(Street::River),
            n => Err(Error::InvalidBoardLength(n)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Community cards. Order is kept for display only; scoring ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board(Vec<Card>);

impl Board {
    /// Builds a board, checking the length is a real street.
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        Street::from_board_len(cards.len())?;
        Ok(Board(cards))
    }

    pub fn empty() -> Self {
        Board(Vec::new())
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn street(&self) -> Street {
        match self.0.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// Number of cards still to come before the river is complete.
    pub fn missing(&self) -> usize {
        5 - self.0.len()
    }
}

impl TryFrom<Vec<Card>> for Board {
    type Error = Error;

    fn try_from(cards: Vec<Card>) -> Result<Self> {
        Board::new(cards)
    }
}

/// Hole cards followed by board cards, rejecting any card seen twice.
pub fn known_cards(hole: &Hole, board: &Board) -> Result<Vec<Card>> {
    let known: Vec<Card> = hole.cards().into_iter().chain(board.cards().iter().copied()).collect();
    Deck::without(&known)?;
    Ok(known)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card(rank, suit)
    }

    #[test]
    fn test_card_display() {
        assert_eq!(c(Rank::Ace, Suit::Spades).to_string(), "A♠");
        assert_eq!(c(Rank::Ten, Suit::Hearts).to_string(), "T♥");
        assert_eq!(c(Rank::Two, Suit::Diamonds).token(), "2d");
    }

    #[test]
    fn test_card_parse() {
        assert_eq!("Ah".parse::<Card>().unwrap(), c(Rank::Ace, Suit::Hearts));
        assert_eq!("Tc".parse::<Card>().unwrap(), c(Rank::Ten, Suit::Clubs));
        assert!("Ax".parse::<Card>().is_err());
        assert!("1h".parse::<Card>().is_err());
        assert!("Ahh".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_serde_uses_token() {
        let json = serde_json::to_string(&c(Rank::King, Suit::Spades)).unwrap();
        assert_eq!(json, "\"Ks\"");
        let back: Card = serde_json::from_str("\"9d\"").unwrap();
        assert_eq!(back, c(Rank::Nine, Suit::Diamonds));
        assert!(serde_json::from_str::<Card>("\"Zz\"").is_err());
    }

    #[test]
    fn test_card_index_round_trips_canonical_order() {
        let deck = Deck::full();
        assert_eq!(deck.len(), 52);
        for (i, card) in deck.cards().iter().enumerate() {
            assert_eq!(card.index() as usize, i);
            assert_eq!(Card::try_from(i as u8).unwrap(), *card);
        }
        assert_eq!(deck.cards()[0], c(Rank::Two, Suit::Clubs));
        assert_eq!(deck.cards()[51], c(Rank::Ace, Suit::Spades));
        assert!(matches!(Card::try_from(52), Err(Error::InvalidCard(_))));
    }

    #[test]
    fn test_full_deck_composition() {
        let deck = Deck::full();
        for rank in Rank::ALL {
            let count = deck.cards().iter().filter(|c| c.rank() == rank).count();
            assert_eq!(count, 4, "Should have 4 cards of {:?}", rank);
        }
        for suit in Suit::ALL {
            let count = deck.cards().iter().filter(|c| c.suit() == suit).count();
            assert_eq!(count, 13, "Should have 13 cards of {:?}", suit);
        }
    }

    #[test]
    fn test_deck_without_excludes_and_keeps_order() {
        let excluded = [c(Rank::Ace, Suit::Spades), c(Rank::Two, Suit::Clubs)];
        let deck = build_deck(&excluded).unwrap();
        assert_eq!(deck.len(), 50);
        assert!(!deck.contains(&excluded[0]));
        assert!(!deck.contains(&excluded[1]));
        assert_eq!(deck[0], c(Rank::Two, Suit::Diamonds));
        assert!(deck.windows(2).all(|w| w[0].index() < w[1].index()));
    }

    #[test]
    fn test_deck_rejects_duplicate_exclusions() {
        let ah = c(Rank::Ace, Suit::Hearts);
        assert!(matches!(Deck::without(&[ah, ah]), Err(Error::DuplicateCard(card)) if card == ah));
    }

    #[test]
    fn test_board_lengths() {
        let cards: Vec<Card> = Deck::full().cards()[..5].to_vec();
        assert_eq!(Board::new(vec![]).unwrap().street(), Street::Preflop);
        assert_eq!(Board::new(cards[..3].to_vec()).unwrap().street(), Street::Flop);
        assert_eq!(Board::new(cards[..4].to_vec()).unwrap().street(), Street::Turn);
        assert_eq!(Board::new(cards.clone()).unwrap().street(), Street::River);
        assert!(matches!(Board::new(cards[..2].to_vec()), Err(Error::InvalidBoardLength(2))));
        assert!(matches!(Board::new(cards[..1].to_vec()), Err(Error::InvalidBoardLength(1))));
    }

    #[test]
    fn test_known_cards_detects_duplicates() {
        let ah = c(Rank::Ace, Suit::Hearts);
        let hole = Hole::new(ah, c(Rank::King, Suit::Diamonds)).unwrap();
        let board = Board::new(vec![ah, c(Rank::Seven, Suit::Clubs), c(Rank::Eight, Suit::Clubs)]).unwrap();
        assert!(matches!(known_cards(&hole, &board), Err(Error::DuplicateCard(card)) if card == ah));
        assert!(matches!(Hole::new(ah, ah), Err(Error::DuplicateCard(_))));
    }
}
