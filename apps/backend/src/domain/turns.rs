use tracing::debug;

use crate::domain::round::declare_exhausted;
use crate::domain::rules::ACTIVE_HAND_SIZE;
use crate::domain::state::{
    hand_mut, left_neighbor, next_seat, require_hand_size, require_phase, require_resting_hand,
    require_turn, GameState, LastDiscard, Phase, Seat,
};
use crate::domain::tiles_logic::remove_tile;
use crate::domain::tiles_types::Tile;
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of a draw from the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckDraw {
    Drew(Tile),
    /// The deck was empty: the round ended with no winner.
    Exhausted,
}

/// Result of a discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscardResult {
    pub tile: Tile,
    pub next_turn: Seat,
}

fn require_can_draw(state: &GameState, seat: Seat) -> Result<(), DomainError> {
    require_phase(state, Phase::Dealt)?;
    require_turn(state, seat)?;
    if state.has_drawn {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDrawn,
            format!("seat {seat} already drew this turn"),
        ));
    }
    require_resting_hand(state, seat)
}

/// Draw the top tile of the deck.
///
/// When every other precondition holds but the deck is empty, the round is
/// ended as a draw and [`DeckDraw::Exhausted`] is returned; the caller
/// reports that to the player as a deck-empty rejection.
pub fn draw_from_deck(state: &mut GameState, seat: Seat) -> Result<DeckDraw, DomainError> {
    require_can_draw(state, seat)?;

    let Some(tile) = state.deck.pop() else {
        declare_exhausted(state);
        return Ok(DeckDraw::Exhausted);
    };
    hand_mut(state, seat)?.push(tile);
    state.has_drawn = true;
    debug!(seat, deck_left = state.deck.len(), "drew from deck");
    Ok(DeckDraw::Drew(tile))
}

/// Take the single most recent discard, which must belong to the left neighbor.
pub fn draw_from_discard(state: &mut GameState, seat: Seat) -> Result<Tile, DomainError> {
    require_can_draw(state, seat)?;

    let Some(last) = state.last_discard else {
        return Err(DomainError::validation(
            ValidationKind::DiscardPileEmpty,
            "no discard is available",
        ));
    };
    let owner = left_neighbor(seat);
    if last.seat != owner {
        return Err(DomainError::validation(
            ValidationKind::WrongDiscardOwner,
            format!("seat {seat} may only take from seat {owner}, last discard is seat {}", last.seat),
        ));
    }
    let pile = &mut state.discards[owner as usize];
    if pile.last() != Some(&last.tile) {
        return Err(DomainError::validation_other(format!(
            "Invariant violated: top of seat {owner} pile is not the last discard"
        )));
    }
    pile.pop();
    state.last_discard = None;
    hand_mut(state, seat)?.push(last.tile);
    state.has_drawn = true;
    debug!(seat, tile = %last.tile, "took left neighbor's discard");
    Ok(last.tile)
}

/// Discard `tile` and pass the turn clockwise.
pub fn discard(state: &mut GameState, seat: Seat, tile: Tile) -> Result<DiscardResult, DomainError> {
    require_phase(state, Phase::Dealt)?;
    require_turn(state, seat)?;
    if !state.has_drawn {
        return Err(DomainError::validation(
            ValidationKind::NotDrawnYet,
            format!("seat {seat} must draw before discarding"),
        ));
    }
    require_hand_size(state, seat, ACTIVE_HAND_SIZE)?;
    if !remove_tile(hand_mut(state, seat)?, tile) {
        return Err(DomainError::validation(
            ValidationKind::TileNotInHand,
            format!("seat {seat} does not hold {tile}"),
        ));
    }

    state.discards[seat as usize].push(tile);
    state.last_discard = Some(LastDiscard { tile, seat });
    let next_turn = next_seat(seat);
    state.turn = Some(next_turn);
    state.has_drawn = false;
    state.turns_taken += 1;
    debug!(seat, %tile, next_turn, "discarded");
    Ok(DiscardResult { tile, next_turn })
}
