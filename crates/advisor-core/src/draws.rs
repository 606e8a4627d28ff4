//! Made hands and one-card draws.
//!
//! This is explanatory output only; the equity number never looks at it.
//! Analysis needs at least five known cards, so preflop yields nothing, and
//! draws are only listed while a card is still to come (flop and turn).

use serde::{Serialize, Serializer};

use crate::cards::{Board, Card, Deck, Hole, Rank, Street, Suit, known_cards};
use crate::error::Result;
use crate::hand::{FiveCardSubsets, HandCategory, HandStrength, score_best, score_five};

/// What a drawing card would complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DrawKind {
    #[serde(rename = "flush draw")]
    Flush,
    #[serde(rename = "straight draw (open-ended)")]
    OpenEndedStraight,
    #[serde(rename = "straight draw (gutshot)")]
    GutshotStraight,
    #[serde(rename = "set draw")]
    Set,
    #[serde(rename = "two-pair draw")]
    TwoPair,
    #[serde(rename = "full house draw")]
    FullHouse,
    #[serde(rename = "quads draw")]
    Quads,
}

impl DrawKind {
    pub fn label(&self) -> &'static str {
        match self {
            DrawKind::Flush => "flush draw",
            DrawKind::OpenEndedStraight => "straight draw (open-ended)",
            DrawKind::GutshotStraight => "straight draw (gutshot)",
            DrawKind::Set => "set draw",
            DrawKind::TwoPair => "two-pair draw",
            DrawKind::FullHouse => "full house draw",
            DrawKind::Quads => "quads draw",
        }
    }
}

/// Cards that would upgrade the hand if dealt next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    #[serde(rename = "type")]
    pub kind: DrawKind,
    pub outs: usize,
    pub cards: Vec<Card>,
}

impl Draw {
    fn new(kind: DrawKind, cards: Vec<Card>) -> Self {
        Self {
            kind,
            outs: cards.len(),
            cards,
        }
    }
}

/// Best current hand with its tie-break ranks for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MadeHand {
    #[serde(rename = "type")]
    pub category: HandCategory,
    #[serde(serialize_with = "rank_symbols")]
    pub kickers: Vec<Rank>,
}

/// One 5-card subset of the known cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combo {
    #[serde(rename = "type")]
    pub category: HandCategory,
    pub cards: [Card; 5],
    pub strength: HandStrength,
    pub label: String,
}

impl Combo {
    fn new(cards: [Card; 5]) -> Self {
        let strength = score_five(&cards);
        let pretty: Vec<String> = cards.iter().map(Card::to_string).collect();
        Self {
            category: strength.category(),
            cards,
            strength,
            label: format!("{} -> {}", pretty.join(" "), strength.category()),
        }
    }
}

/// Everything the advisor shows about the hero's current holding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PossibleHands {
    pub made: Option<MadeHand>,
    pub draws: Vec<Draw>,
    pub best_made: Option<Combo>,
    pub made_combos: Vec<Combo>,
}

fn rank_symbols<S: Serializer>(ranks: &[Rank], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(ranks.iter().map(Rank::symbol))
}

/// Best hand from the known cards, or `None` with fewer than five of them.
pub fn made_hand(hole: &Hole, board: &Board) -> Result<Option<MadeHand>> {
    let known = known_cards(hole, board)?;
    if known.len() < 5 {
        return Ok(None);
    }
    let strength = score_best(&known)?;
    Ok(Some(MadeHand {
        category: strength.category(),
        kickers: strength.tiebreaks(),
    }))
}

/// Every 5-card subset of the known cards, strongest first.
pub fn all_five_card_combinations(hole: &Hole, board: &Board) -> Result<Vec<Combo>> {
    let known = known_cards(hole, board)?;
    let mut combos: Vec<Combo> = FiveCardSubsets::new(&known).map(Combo::new).collect();
    combos.sort_by(|a, b| b.strength.cmp(&a.strength));
    Ok(combos)
}

/// One-card draws on the flop or turn, most outs first.
pub fn find_draws(hole: &Hole, board: &Board) -> Result<Vec<Draw>> {
    let known = known_cards(hole, board)?;
    if matches!(board.street(), Street::Preflop | Street::River) {
        return Ok(Vec::new());
    }
    let deck = Deck::without(&known)?;
    let remaining = |keep: &dyn Fn(&Card) -> bool| -> Vec<Card> {
        deck.cards().iter().copied().filter(|c| keep(c)).collect()
    };

    let mut draws = Vec::new();

    for suit in Suit::ALL {
        if known.iter().filter(|c| c.suit() == suit).count() == 4 {
            draws.push(Draw::new(DrawKind::Flush, remaining(&|c: &Card| c.suit() == suit)));
        }
    }

    // index 1 stands in for the ace playing low
    let mut present = [false; 15];
    for card in &known {
        present[card.rank().value() as usize] = true;
    }
    present[1] = present[Rank::Ace.value() as usize];

    for low in 1..=10usize {
        let missing: Vec<usize> = (low..low + 5).filter(|&v| !present[v]).collect();
        let [gap] = missing[..] else { continue };

        let needed = if gap == 1 { Rank::Ace } else { rank_at(gap) };
        let kind = if straight_is_open_ended(low, gap) {
            DrawKind::OpenEndedStraight
        } else {
            DrawKind::GutshotStraight
        };
        draws.push(Draw::new(kind, remaining(&|c: &Card| c.rank() == needed)));
    }

    let mut counts = [0u8; 15];
    for card in &known {
        counts[card.rank().value() as usize] += 1;
    }
    for rank in Rank::ALL.into_iter().rev() {
        match counts[rank.value() as usize] {
            1 => draws.push(Draw::new(DrawKind::TwoPair, remaining(&|c: &Card| c.rank() == rank))),
            2 => draws.push(Draw::new(DrawKind::Set, remaining(&|c: &Card| c.rank() == rank))),
            3 => {
                let pairing = |c: &Card| c.rank() != rank && counts[c.rank().value() as usize] > 0;
                draws.push(Draw::new(DrawKind::FullHouse, remaining(&pairing)));
                draws.push(Draw::new(DrawKind::Quads, remaining(&|c: &Card| c.rank() == rank)));
            }
            _ => {}
        }
    }

    // stable: equal out counts keep detection order
    draws.sort_by(|a, b| b.outs.cmp(&a.outs));
    Ok(draws)
}

fn rank_at(value: usize) -> Rank {
    Rank::ALL[value - 2]
}

/// Four ranks present in the window `low..low+5` count as open-ended when the
/// missing rank sits at either end of the window, broadway and wheel included.
fn straight_is_open_ended(low: usize, gap: usize) -> bool {
    gap == low || gap == low + 4
}

/// Made hand, sorted combinations and draws in one pass.
pub fn possible_hands(hole: &Hole, board: &Board) -> Result<PossibleHands> {
    let made_combos = if board.is_empty() {
        known_cards(hole, board)?;
        Vec::new()
    } else {
        all_five_card_combinations(hole, board)?
    };
    Ok(PossibleHands {
        made: made_hand(hole, board)?,
        draws: find_draws(hole, board)?,
        best_made: made_combos.first().cloned(),
        made_combos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(tokens: &[&str]) -> Vec<Card> {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    fn hole(a: &str, b: &str) -> Hole {
        Hole::new(a.parse().unwrap(), b.parse().unwrap()).unwrap()
    }

    fn board(tokens: &[&str]) -> Board {
        Board::new(cards(tokens)).unwrap()
    }

    fn of_kind(draws: &[Draw], kind: DrawKind) -> Vec<&Draw> {
        draws.iter().filter(|d| d.kind == kind).collect()
    }

    #[test]
    fn test_flush_draw_has_nine_outs() {
        let draws = find_draws(&hole("Ah", "Kh"), &board(&["2h", "7h", "9c"])).unwrap();
        let flush = of_kind(&draws, DrawKind::Flush);
        assert_eq!(flush.len(), 1);
        assert_eq!(flush[0].outs, 9);
        assert!(flush[0].cards.iter().all(|c| c.suit() == Suit::Hearts));
        assert_eq!(draws[0].kind, DrawKind::Flush);
    }

    #[test]
    fn test_no_draws_on_river_or_preflop() {
        let river = find_draws(&hole("Ah", "Kh"), &board(&["2h", "7h", "9c", "3d", "Js"])).unwrap();
        assert!(river.is_empty());
        let preflop = find_draws(&hole("Ah", "Kh"), &board(&[])).unwrap();
        assert!(preflop.is_empty());
    }

    #[test]
    fn test_open_ended_straight_draw() {
        let draws = find_draws(&hole("5c", "6d"), &board(&["7h", "8s", "Kc"])).unwrap();
        let open = of_kind(&draws, DrawKind::OpenEndedStraight);
        assert_eq!(open.len(), 2);
        let mut outs: Vec<Rank> = open.iter().flat_map(|d| d.cards.iter().map(Card::rank)).collect();
        outs.sort();
        outs.dedup();
        assert_eq!(outs, vec![Rank::Four, Rank::Nine]);
        assert!(open.iter().all(|d| d.outs == 4));
        assert!(of_kind(&draws, DrawKind::GutshotStraight).is_empty());
    }

    #[test]
    fn test_gutshot_straight_draw() {
        let draws = find_draws(&hole("5c", "6d"), &board(&["8h", "9s", "Kc"])).unwrap();
        let gut = of_kind(&draws, DrawKind::GutshotStraight);
        assert_eq!(gut.len(), 1);
        assert!(gut[0].cards.iter().all(|c| c.rank() == Rank::Seven));
        assert_eq!(gut[0].outs, 4);
    }

    #[test]
    fn test_runs_ending_at_the_ace_are_open_ended() {
        let draws = find_draws(&hole("Ac", "Kd"), &board(&["Qh", "Js", "3c"])).unwrap();
        let open = of_kind(&draws, DrawKind::OpenEndedStraight);
        assert_eq!(open.len(), 1);
        assert!(open[0].cards.iter().all(|c| c.rank() == Rank::Ten));
        assert_eq!(open[0].outs, 4);
        assert!(of_kind(&draws, DrawKind::GutshotStraight).is_empty());

        let draws = find_draws(&hole("Ac", "2d"), &board(&["3h", "4s", "Jc"])).unwrap();
        let open = of_kind(&draws, DrawKind::OpenEndedStraight);
        assert_eq!(open.len(), 1);
        assert!(open[0].cards.iter().all(|c| c.rank() == Rank::Five));
        assert!(of_kind(&draws, DrawKind::GutshotStraight).is_empty());
    }

    #[test]
    fn test_inside_gap_next_to_ace_is_gutshot() {
        let draws = find_draws(&hole("Ac", "Kd"), &board(&["Qh", "Ts", "3c"])).unwrap();
        let gut = of_kind(&draws, DrawKind::GutshotStraight);
        assert_eq!(gut.len(), 1);
        assert!(gut[0].cards.iter().all(|c| c.rank() == Rank::Jack));
        assert!(of_kind(&draws, DrawKind::OpenEndedStraight).is_empty());
    }

    #[test]
    fn test_wheel_run_is_open_ended_via_ace() {
        let draws = find_draws(&hole("2c", "3d"), &board(&["4h", "5s", "Jc"])).unwrap();
        let open = of_kind(&draws, DrawKind::OpenEndedStraight);
        let mut outs: Vec<Rank> = open.iter().flat_map(|d| d.cards.iter().map(Card::rank)).collect();
        outs.sort();
        outs.dedup();
        assert_eq!(outs, vec![Rank::Six, Rank::Ace]);
    }

    #[test]
    fn test_pair_draws() {
        let draws = find_draws(&hole("Qs", "Qd"), &board(&["Jc", "8d", "3s"])).unwrap();
        let set = of_kind(&draws, DrawKind::Set);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].outs, 2);
        let two_pair = of_kind(&draws, DrawKind::TwoPair);
        assert_eq!(two_pair.len(), 3);
        assert!(two_pair.iter().all(|d| d.outs == 3));
    }

    #[test]
    fn test_trips_draws() {
        let draws = find_draws(&hole("7s", "7d"), &board(&["7c", "Kd", "2s"])).unwrap();
        let boat = of_kind(&draws, DrawKind::FullHouse);
        assert_eq!(boat.len(), 1);
        assert_eq!(boat[0].outs, 6);
        assert!(boat[0].cards.iter().all(|c| matches!(c.rank(), Rank::King | Rank::Two)));
        let quads = of_kind(&draws, DrawKind::Quads);
        assert_eq!(quads[0].cards, cards(&["7h"]));
    }

    #[test]
    fn test_draws_sorted_by_outs() {
        let draws = find_draws(&hole("Ah", "Kh"), &board(&["2h", "7h", "9c", "Qd"])).unwrap();
        assert!(draws.windows(2).all(|w| w[0].outs >= w[1].outs));
    }

    #[test]
    fn test_made_hand_and_combos() {
        let h = hole("Ah", "Kh");
        let b = board(&["2h", "7h", "9h", "Ks"]);
        let made = made_hand(&h, &b).unwrap().unwrap();
        assert_eq!(made.category, HandCategory::Flush);
        assert_eq!(made.kickers, vec![Rank::Ace, Rank::King, Rank::Nine, Rank::Seven, Rank::Two]);

        let combos = all_five_card_combinations(&h, &b).unwrap();
        assert_eq!(combos.len(), 6);
        assert_eq!(combos[0].category, HandCategory::Flush);
        assert!(combos.windows(2).all(|w| w[0].strength >= w[1].strength));
        assert!(combos[0].label.ends_with("-> Flush"));
    }

    #[test]
    fn test_combination_counts_by_street() {
        let h = hole("Ah", "Kh");
        assert_eq!(all_five_card_combinations(&h, &board(&["2c", "3c", "4c"])).unwrap().len(), 1);
        assert_eq!(all_five_card_combinations(&h, &board(&["2c", "3c", "4c", "5c"])).unwrap().len(), 6);
        assert_eq!(
            all_five_card_combinations(&h, &board(&["2c", "3c", "4c", "5c", "6c"])).unwrap().len(),
            21
        );
    }

    #[test]
    fn test_preflop_is_empty() {
        let hands = possible_hands(&hole("Ah", "Ad"), &board(&[])).unwrap();
        assert_eq!(hands, PossibleHands::default());
    }

    #[test]
    fn test_serialized_shape() {
        let hands = possible_hands(&hole("Ah", "Kh"), &board(&["2h", "7h", "9c"])).unwrap();
        let json = serde_json::to_value(&hands).unwrap();
        assert_eq!(json["made"]["type"], "High Card");
        assert_eq!(json["made"]["kickers"][0], "A");
        assert_eq!(json["draws"][0]["type"], "flush draw");
        assert_eq!(json["draws"][0]["outs"], 9);
        assert_eq!(json["best_made"]["cards"][0], "Ah");
    }
}
