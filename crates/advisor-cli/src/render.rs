//! Plain-text report for the terminal.

use std::fmt::Write;

use advisor_core::{AdviceResult, Card};

fn pretty(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
}

pub fn report(result: &AdviceResult) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "Street:  {}", result.street);
    let _ = writeln!(out, "Equity:  {:.1}%", result.equity_pct);
    let _ = writeln!(out, "Action:  {}", result.action.label().to_uppercase());
    let _ = writeln!(out, "Why:     {}", result.rationale);

    let hands = &result.possible_hands;
    if let Some(made) = &hands.made {
        let kickers: Vec<&str> = made.kickers.iter().map(|r| r.symbol()).collect();
        let _ = writeln!(out, "Made:    {} ({})", made.category, kickers.join(" "));
    }
    if let Some(best) = &hands.best_made {
        let _ = writeln!(out, "Best 5:  {}", best.label);
    }
    if !hands.draws.is_empty() {
        let _ = writeln!(out, "Draws:");
        for draw in &hands.draws {
            let _ = writeln!(
                out,
                "  {} ({} outs): {}",
                draw.kind.label(),
                draw.outs,
                pretty(&draw.cards)
            );
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{AdviseOptions, Advisor};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_report_lists_draws() {
        let hole = ["Ah".parse().unwrap(), "Kh".parse().unwrap()];
        let board: Vec<Card> = ["2h", "7h", "9c"].iter().map(|t| t.parse().unwrap()).collect();
        let options = AdviseOptions {
            trials: Some(1_000),
            ..AdviseOptions::default()
        };
        let result = Advisor::default()
            .advise_with_rng(hole, &board, 1, &options, &mut StdRng::seed_from_u64(11))
            .unwrap();
        let text = report(&result);
        assert!(text.starts_with("Street:  flop"));
        assert!(text.contains("Made:    High Card (A K 9 7 2)"));
        assert!(text.contains("  flush draw (9 outs): "));
        assert!(text.contains("(trials=1000)"));
    }
}
