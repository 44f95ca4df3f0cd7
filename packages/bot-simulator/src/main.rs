//! Bot Simulator CLI - plays whole Okey matches between bot policies in memory.
//!
//! Useful for checking that a policy only makes legal moves and for comparing
//! policies over many matches.

mod simulator;
mod summary;

use std::time::Instant;

use clap::Parser;
use okey_backend::ai::registry::registered_bots;
use simulator::Simulator;
use summary::SimulationSummary;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bot-simulator")]
#[command(about = "In-memory Okey match simulator for bot policies")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    matches: u32,

    /// Policy for all seats (shortcut to set all 4 seats to the same policy)
    #[arg(long, conflicts_with_all = ["seat0", "seat1", "seat2", "seat3"])]
    seats: Option<String>,

    /// Policy for seat 0
    #[arg(long, default_value = "Conservative")]
    seat0: String,

    /// Policy for seat 1
    #[arg(long, default_value = "Conservative")]
    seat1: String,

    /// Policy for seat 2
    #[arg(long, default_value = "RandomPlayer")]
    seat2: String,

    /// Policy for seat 3
    #[arg(long, default_value = "RandomPlayer")]
    seat3: String,

    /// Base seed; match N uses seed + N - 1. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop a match after this many rounds even if nobody ran out of points
    #[arg(long, default_value = "200")]
    max_rounds: u32,

    /// Starting points (5, 13 or 20)
    #[arg(long, default_value = "20")]
    starting_points: i16,

    /// Print one JSON line per finished match
    #[arg(long)]
    per_match: bool,

    /// List registered policies and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.list {
        for factory in registered_bots() {
            println!("{} {}", factory.name, factory.version);
        }
        return Ok(());
    }

    let seat_policies: [String; 4] = match args.seats {
        Some(name) => std::array::from_fn(|_| name.clone()),
        None => [args.seat0, args.seat1, args.seat2, args.seat3],
    };
    info!(
        matches = args.matches,
        policies = ?seat_policies,
        "starting simulation"
    );

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for match_no in 1..=args.matches {
        let match_seed = base_seed.wrapping_add(u64::from(match_no - 1));
        let sim = Simulator::new(match_seed, args.starting_points);
        let outcome = sim
            .seat_policies(&seat_policies)
            .and_then(|policies| sim.simulate_match(match_no, &policies, args.max_rounds));

        match outcome {
            Ok(result) => {
                if args.per_match {
                    println!("{}", serde_json::to_string(&result)?);
                }
                info!(match_no, scores = ?result.final_scores, rounds = result.rounds.len(), "match finished");
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(match_no, match_seed, error = %e, "match failed");
            }
        }
    }

    let mut summary = SimulationSummary::from_results(&results, errors);
    summary.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
