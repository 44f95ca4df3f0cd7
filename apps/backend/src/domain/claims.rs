//! Win claims. A successful claim scores the round and ends it; a failed
//! claim leaves the table untouched.

use tracing::info;

use crate::domain::hand_analysis::SearchBudget;
use crate::domain::rules::{ACTIVE_HAND_SIZE, RESTING_HAND_SIZE};
use crate::domain::scoring::{apply_penalty, match_loser, penalty_for, win_kind, RoundOutcome, RoundWin, WinKind};
use crate::domain::state::{hand, hand_mut, require_hand_size, require_phase, require_turn, require_wildcard, GameState, Phase, Seat};
use crate::domain::tiles_logic::remove_tile;
use crate::domain::tiles_types::Tile;
use crate::domain::winning::{check_pairs_winning, check_winning, Arrangement};
use crate::errors::domain::{DomainError, ValidationKind};

/// Finish with 15 tiles: one goes out, the other 14 form groups or pairs.
pub fn claim_win(state: &mut GameState, seat: Seat, budget: SearchBudget) -> Result<RoundWin, DomainError> {
    require_phase(state, Phase::Dealt)?;
    require_turn(state, seat)?;
    require_hand_size(state, seat, ACTIVE_HAND_SIZE)?;
    let wildcard = require_wildcard(state, "claim_win")?;

    let Some(win) = check_winning(hand(state, seat)?, wildcard, budget)? else {
        return Err(DomainError::validation(
            ValidationKind::InvalidDecomposition,
            format!("seat {seat} has no winning arrangement"),
        ));
    };

    let kind = win_kind(&win, wildcard);
    if !remove_tile(hand_mut(state, seat)?, win.discarded) {
        return Err(DomainError::validation_other(
            "Invariant violated: finishing tile vanished from hand",
        ));
    }
    state.discards[seat as usize].push(win.discarded);
    Ok(settle(state, seat, kind, Some(win.discarded), win.arrangement))
}

/// Finish with 14 tiles in seven pairs, without drawing.
pub fn claim_pair_win(state: &mut GameState, seat: Seat) -> Result<RoundWin, DomainError> {
    require_phase(state, Phase::Dealt)?;
    require_turn(state, seat)?;
    if state.has_drawn {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDrawn,
            format!("seat {seat} already drew; claim the win with 15 tiles instead"),
        ));
    }
    require_hand_size(state, seat, RESTING_HAND_SIZE)?;
    let wildcard = require_wildcard(state, "claim_pair_win")?;

    let Some(pairs) = check_pairs_winning(hand(state, seat)?, wildcard)? else {
        return Err(DomainError::validation(
            ValidationKind::InvalidDecomposition,
            format!("seat {seat} does not hold seven pairs"),
        ));
    };
    Ok(settle(state, seat, WinKind::Pairs, None, Arrangement::Pairs(pairs)))
}

fn settle(
    state: &mut GameState,
    winner: Seat,
    kind: WinKind,
    discarded: Option<Tile>,
    arrangement: Arrangement,
) -> RoundWin {
    let penalty = penalty_for(kind);
    let score_changes = apply_penalty(&mut state.scores, winner, penalty);
    let loser = match_loser(&state.scores);
    let match_over = loser.is_some();

    state.phase = if match_over { Phase::MatchOver } else { Phase::RoundOver };
    state.turn = None;
    state.has_drawn = false;
    state.last_discard = None;

    let result = RoundWin {
        round_no: state.round_no,
        winner,
        kind,
        discarded,
        arrangement,
        penalty,
        score_changes,
        scores: state.scores,
        match_over,
        loser,
    };
    state.last_outcome = Some(RoundOutcome::Won(result.clone()));
    info!(
        round_no = state.round_no,
        winner,
        kind = ?kind,
        penalty,
        scores = ?state.scores,
        match_over,
        "round won"
    );
    result
}
