//! Round scoring. Scores count down from the table's starting points; the
//! winner keeps theirs and every other seat pays the penalty.

use serde::Serialize;

use super::rules::{BASE_PENALTY, PAIR_WIN_PENALTY, PLAYERS, WILDCARD_FINISH_MULTIPLIER};
use super::state::Seat;
use super::tiles_types::{Tile, Wildcard};
use super::winning::{Arrangement, WinningHand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WinKind {
    /// Groups, finishing on an ordinary tile.
    Plain,
    /// Groups, finishing by discarding a wildcard.
    WildcardFinish,
    /// Seven pairs.
    Pairs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundWin {
    pub round_no: u32,
    pub winner: Seat,
    pub kind: WinKind,
    /// Finishing discard; absent for a pairs claim made without drawing.
    pub discarded: Option<Tile>,
    pub arrangement: Arrangement,
    pub penalty: i16,
    /// Signed change per seat (0 for the winner).
    pub score_changes: [i16; PLAYERS],
    pub scores: [i16; PLAYERS],
    pub match_over: bool,
    pub loser: Option<Seat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundOutcome {
    Won(RoundWin),
    /// Deck ran out with no winner; scores unchanged.
    Exhausted { round_no: u32 },
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<Seat> {
        match self {
            RoundOutcome::Won(win) => Some(win.winner),
            RoundOutcome::Exhausted { .. } => None,
        }
    }
}

pub fn win_kind(win: &WinningHand, wildcard: Wildcard) -> WinKind {
    match win.arrangement {
        Arrangement::Pairs(_) => WinKind::Pairs,
        Arrangement::Groups(_) if wildcard.matches(win.discarded) => WinKind::WildcardFinish,
        Arrangement::Groups(_) => WinKind::Plain,
    }
}

/// Points each losing seat pays for a win of this kind.
pub fn penalty_for(kind: WinKind) -> i16 {
    match kind {
        WinKind::Plain => BASE_PENALTY,
        WinKind::WildcardFinish => BASE_PENALTY * WILDCARD_FINISH_MULTIPLIER,
        WinKind::Pairs => PAIR_WIN_PENALTY,
    }
}

pub fn calculate_score(win: &WinningHand, wildcard: Wildcard) -> i16 {
    penalty_for(win_kind(win, wildcard))
}

/// Deduct `penalty` from every seat but the winner, never below zero.
/// Returns the signed change applied to each seat.
pub fn apply_penalty(scores: &mut [i16; PLAYERS], winner: Seat, penalty: i16) -> [i16; PLAYERS] {
    let mut changes = [0; PLAYERS];
    for (seat, score) in scores.iter_mut().enumerate() {
        if seat == winner as usize {
            continue;
        }
        let after = (*score - penalty).max(0);
        changes[seat] = after - *score;
        *score = after;
    }
    changes
}

/// First seat (in seat order) whose score is exhausted.
pub fn match_loser(scores: &[i16; PLAYERS]) -> Option<Seat> {
    scores.iter().position(|&s| s <= 0).map(|s| s as Seat)
}
