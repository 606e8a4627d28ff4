use advisor_core::cards::{Board, Card, Deck, Hole};
use advisor_core::config::EquityConfig;
use advisor_core::equity::Simulator;
use advisor_core::hand::score_seven;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::hint::black_box;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        scoring_seven_card_hands,
        simulating_flop_equity,
}

fn random_sevens(n: usize) -> Vec<[Card; 7]> {
    let mut rng = StdRng::seed_from_u64(0xBE7C);
    let mut deck = Deck::full().cards().to_vec();
    (0..n)
        .map(|_| {
            deck.shuffle(&mut rng);
            [deck[0], deck[1], deck[2], deck[3], deck[4], deck[5], deck[6]]
        })
        .collect()
}

fn scoring_seven_card_hands(c: &mut criterion::Criterion) {
    let hands = random_sevens(1_000);
    c.bench_function("score 1000 7-card hands", |b| {
        b.iter(|| hands.iter().map(|h| score_seven(black_box(h))).max())
    });
}

fn simulating_flop_equity(c: &mut criterion::Criterion) {
    let hole = Hole::new("Ah".parse().unwrap(), "Kh".parse().unwrap()).unwrap();
    let board = Board::new(["2h", "7h", "9c"].iter().map(|t| t.parse().unwrap()).collect()).unwrap();
    let simulator = Simulator::new(EquityConfig::default());
    c.bench_function("simulate 2000 flop trials vs 2 opponents", |bench| {
        let mut rng = StdRng::seed_from_u64(7);
        bench.iter(|| simulator.estimate(&hole, &board, 2, 2_000, &mut rng))
    });
}
