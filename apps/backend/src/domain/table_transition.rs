//! Edge-triggered table transitions derived from before/after views.

use crate::domain::rules::PLAYERS;
use crate::domain::state::{Phase, Seat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLifecycleView {
    pub version: u64,
    pub phase: Phase,
    pub turn: Option<Seat>,
    /// Whether each seat is currently driven by a bot.
    pub automated: [bool; PLAYERS],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableTransition {
    /// The turn passed to a specific seat.
    TurnBecame { seat: Seat },
    /// A round was dealt.
    RoundStarted,
    /// The active round ended (win or exhausted deck).
    RoundEnded,
    /// A score reached zero.
    MatchEnded,
    /// A seat's controller swapped between human and bot.
    SeatControlChanged { seat: Seat, automated: bool },
}

pub fn derive_table_transitions(before: &TableLifecycleView, after: &TableLifecycleView) -> Vec<TableTransition> {
    let mut transitions = Vec::new();

    if before.phase != Phase::Dealt && after.phase == Phase::Dealt {
        transitions.push(TableTransition::RoundStarted);
    }

    if let Some(seat) = after.turn {
        if before.turn != Some(seat) || before.phase != after.phase {
            transitions.push(TableTransition::TurnBecame { seat });
        }
    }

    if before.phase == Phase::Dealt && matches!(after.phase, Phase::RoundOver | Phase::MatchOver) {
        transitions.push(TableTransition::RoundEnded);
    }
    if before.phase != Phase::MatchOver && after.phase == Phase::MatchOver {
        transitions.push(TableTransition::MatchEnded);
    }

    for seat in 0..PLAYERS {
        if before.automated[seat] != after.automated[seat] {
            transitions.push(TableTransition::SeatControlChanged {
                seat: seat as Seat,
                automated: after.automated[seat],
            });
        }
    }

    transitions
}
