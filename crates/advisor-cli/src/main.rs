use std::process::ExitCode;

use advisor_core::{AdviseOptions, Advisor, EquityConfig, TracingObserver};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod parse;
mod render;

use parse::{CardListError, parse_card_list};

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Hold'em equity and action advice", long_about = None)]
struct Cli {
    /// Hole cards, e.g. "Ah Kd" or "A♥,K♦"
    hole: String,

    /// Board cards (none, flop, turn or river)
    #[arg(short, long, default_value = "")]
    board: String,

    /// Number of opponents
    #[arg(short, long, default_value_t = 1)]
    opponents: usize,

    /// Monte Carlo trials (raised to the minimum when lower)
    #[arg(short, long)]
    trials: Option<usize>,

    /// Pot before calling
    #[arg(short, long)]
    pot: Option<f64>,

    /// Amount to call
    #[arg(short = 'c', long)]
    to_call: Option<f64>,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Independent simulation streams (falls back to ADVISOR_WORKERS)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Cards(#[from] CardListError),

    #[error("expected exactly 2 hole cards (got {0})")]
    HoleCount(usize),

    #[error(transparent)]
    Advisor(#[from] advisor_core::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    // Respects RUST_LOG; stdout stays clean for the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let hole = parse_card_list(&cli.hole, &[])?;
    let [first, second] = hole[..] else {
        return Err(CliError::HoleCount(hole.len()));
    };
    let board = parse_card_list(&cli.board, &hole)?;

    let mut config = EquityConfig::default();
    if let Some(workers) = cli.workers.or_else(|| {
        std::env::var("ADVISOR_WORKERS")
            .ok()
            .and_then(|w| w.parse().ok())
    }) {
        config.workers = workers;
    }

    let config = config.normalized();
    let hole_text = format!("{first} {second}");
    tracing::debug!(
        hole = %hole_text,
        board = board.len(),
        opponents = cli.opponents,
        workers = config.workers,
        seed = cli.seed,
        "parsed input"
    );

    let observer = TracingObserver;
    let advisor = Advisor::new(config).with_observer(&observer);
    let options = AdviseOptions {
        trials: cli.trials,
        pot: cli.pot,
        to_call: cli.to_call,
    };
    let result = match cli.seed {
        Some(seed) => advisor.advise_with_rng(
            [first, second],
            &board,
            cli.opponents,
            &options,
            &mut StdRng::seed_from_u64(seed),
        )?,
        None => advisor.advise([first, second], &board, cli.opponents, &options)?,
    };

    if cli.json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        Ok(render::report(&result))
    }
}
