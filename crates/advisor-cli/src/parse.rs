//! Free-text card input.
//!
//! Accepts the forms people actually type: `Ah`, `ah`, `A♥`, `10d`, `K-h`,
//! separated by spaces, commas, slashes or pipes.

use advisor_core::{Card, Rank, Suit};
use thiserror::Error;

/// Problem with a single token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid card: \"{0}\"")]
    Invalid(String),
    #[error("duplicate card: {0}")]
    Duplicate(Card),
}

/// Every bad token in one list, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join(.0))]
pub struct CardListError(pub Vec<TokenError>);

fn join(errors: &[TokenError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Reads one card, or `None` when the token names no card.
pub fn normalize_token(raw: &str) -> Option<Card> {
    let token: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | '_' | '-'))
        .collect();
    let last = token.chars().last()?;
    let suit = match last {
        '♣' => Suit::Clubs,
        '♦' => Suit::Diamonds,
        '♥' => Suit::Hearts,
        '♠' => Suit::Spades,
        c => Suit::from_letter(c.to_ascii_lowercase())?,
    };

    let rank_part = &token[..token.len() - last.len_utf8()];
    let rank = match rank_part {
        "10" => Rank::Ten,
        _ => {
            let mut chars = rank_part.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return None;
            };
            Rank::from_symbol(c.to_ascii_uppercase())?
        }
    };
    Some(Card(rank, suit))
}

/// Splits on whitespace, `,`, `|` and `/`.
pub fn tokenize(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '|' | '/'))
        .filter(|t| !t.is_empty())
}

/// Parses a card list, rejecting cards already in `used` or repeated in the
/// list itself.
pub fn parse_card_list(input: &str, used: &[Card]) -> Result<Vec<Card>, CardListError> {
    let mut cards = Vec::new();
    let mut errors = Vec::new();
    for token in tokenize(input) {
        match normalize_token(token) {
            None => errors.push(TokenError::Invalid(token.to_string())),
            Some(card) if used.contains(&card) || cards.contains(&card) => {
                errors.push(TokenError::Duplicate(card))
            }
            Some(card) => cards.push(card),
        }
    }
    if errors.is_empty() {
        Ok(cards)
    } else {
        Err(CardListError(errors))
    }
}
