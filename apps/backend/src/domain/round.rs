//! Round lifecycle: starting a match, dealing rounds, ending without a winner.

use tracing::info;

use crate::domain::dealing::deal_round;
use crate::domain::rules::{valid_starting_points, PLAYERS};
use crate::domain::scoring::RoundOutcome;
use crate::domain::state::{require_phase, GameState, Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// Reset scores to `starting_points` and deal round 1.
///
/// Seating and readiness are checked by the caller, which owns the seats.
pub fn start_match(state: &mut GameState, starting_points: i16, seed: u64) -> Result<Seat, DomainError> {
    if !state.phase.is_lobby() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("cannot start a match while {:?}", state.phase),
        ));
    }
    if !valid_starting_points(starting_points) {
        return Err(DomainError::validation(
            ValidationKind::InvalidStartingPoints,
            format!("starting points {starting_points} not allowed"),
        ));
    }
    state.starting_points = starting_points;
    state.scores = [starting_points; PLAYERS];
    state.round_no = 0;
    state.last_outcome = None;
    deal_next_round(state, seed)
}

/// Deal the round after a finished one, carrying scores.
pub fn start_next_round(state: &mut GameState, seed: u64) -> Result<Seat, DomainError> {
    require_phase(state, Phase::RoundOver)?;
    deal_next_round(state, seed)
}

fn deal_next_round(state: &mut GameState, seed: u64) -> Result<Seat, DomainError> {
    let dealt = deal_round(seed)?;
    state.round_no += 1;
    state.deck = dealt.deck;
    state.hands = dealt.hands;
    state.discards = Default::default();
    state.last_discard = None;
    state.indicator = Some(dealt.indicator);
    state.wildcard = Some(dealt.wildcard);
    state.turn = Some(dealt.starting_seat);
    // The starting seat holds 15 tiles and opens with a discard.
    state.has_drawn = true;
    state.turns_taken = 0;
    state.phase = Phase::Dealt;
    info!(
        round_no = state.round_no,
        starting_seat = dealt.starting_seat,
        indicator = %dealt.indicator,
        "round dealt"
    );
    Ok(dealt.starting_seat)
}

/// End the active round with no winner.
pub fn declare_exhausted(state: &mut GameState) {
    state.phase = Phase::RoundOver;
    state.turn = None;
    state.has_drawn = false;
    state.last_outcome = Some(RoundOutcome::Exhausted {
        round_no: state.round_no,
    });
    info!(round_no = state.round_no, "deck exhausted, round ends without a winner");
}
