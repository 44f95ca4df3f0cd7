//! Aggregate statistics over many simulated matches.

use okey_backend::domain::WinKind;
use serde::Serialize;

use crate::simulator::MatchResult;

const PLAYERS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub matches: u32,
    pub errors: u32,
    pub rounds: u32,
    /// Rounds won, per seat.
    pub wins_per_seat: [u32; PLAYERS],
    /// Matches lost (score exhausted), per seat.
    pub losses_per_seat: [u32; PLAYERS],
    pub pair_wins: u32,
    pub wildcard_finishes: u32,
    pub exhausted_rounds: u32,
    pub mean_turns_per_round: f64,
    pub fallbacks: u32,
    pub elapsed_ms: f64,
}

impl SimulationSummary {
    pub fn from_results(results: &[MatchResult], errors: u32) -> Self {
        let mut summary = SimulationSummary {
            matches: results.len() as u32,
            errors,
            ..Default::default()
        };
        let mut turns: u64 = 0;

        for result in results {
            summary.fallbacks += result.fallbacks;
            if let Some(loser) = result.loser {
                summary.losses_per_seat[loser as usize] += 1;
            }
            for round in &result.rounds {
                summary.rounds += 1;
                turns += u64::from(round.turns);
                match (round.winner, round.kind) {
                    (Some(winner), Some(kind)) => {
                        summary.wins_per_seat[winner as usize] += 1;
                        match kind {
                            WinKind::Pairs => summary.pair_wins += 1,
                            WinKind::WildcardFinish => summary.wildcard_finishes += 1,
                            WinKind::Plain => {}
                        }
                    }
                    _ => summary.exhausted_rounds += 1,
                }
            }
        }

        if summary.rounds > 0 {
            summary.mean_turns_per_round = turns as f64 / f64::from(summary.rounds);
        }
        summary
    }
}
