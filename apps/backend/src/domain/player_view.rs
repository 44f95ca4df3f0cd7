//! What one seat can see at its decision point.
//!
//! [`SeatView`] is the interface between the table and automated players: it
//! carries the seat's own hand plus public table facts, and helper methods
//! that answer rule questions so policies never re-implement them.

use crate::domain::hand_analysis::SearchBudget;
use crate::domain::rules::{ACTIVE_HAND_SIZE, PLAYERS, RESTING_HAND_SIZE};
use crate::domain::state::{hand, left_neighbor, require_turn, require_wildcard, GameState, LastDiscard, Seat};
use crate::domain::tiles_types::{Tile, Wildcard};
use crate::domain::winning::{check_pairs_winning, check_winning, WinningHand};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct SeatView {
    pub seat: Seat,
    pub hand: Vec<Tile>,
    pub has_drawn: bool,
    pub wildcard: Wildcard,
    pub indicator: Option<Tile>,
    pub deck_remaining: usize,
    pub last_discard: Option<LastDiscard>,
    pub discard_piles: [Vec<Tile>; PLAYERS],
    pub scores: [i16; PLAYERS],
    pub round_no: u32,
    pub search_budget: SearchBudget,
}

impl SeatView {
    /// Build the view for the seat currently holding the turn.
    pub fn for_turn(state: &GameState, seat: Seat, search_budget: SearchBudget) -> Result<Self, DomainError> {
        require_turn(state, seat)?;
        Ok(Self {
            seat,
            hand: hand(state, seat)?.clone(),
            has_drawn: state.has_drawn,
            wildcard: require_wildcard(state, "seat view")?,
            indicator: state.indicator,
            deck_remaining: state.deck.len(),
            last_discard: state.last_discard,
            discard_piles: state.discards.clone(),
            scores: state.scores,
            round_no: state.round_no,
            search_budget,
        })
    }

    /// The seat still has to draw this turn.
    pub fn must_draw(&self) -> bool {
        !self.has_drawn && self.hand.len() == RESTING_HAND_SIZE
    }

    /// The seat holds 15 tiles and must finish or discard.
    pub fn must_discard(&self) -> bool {
        self.has_drawn && self.hand.len() == ACTIVE_HAND_SIZE
    }

    /// The discard this seat may legally pick up, if any.
    pub fn takeable_discard(&self) -> Option<Tile> {
        self.last_discard
            .filter(|d| d.seat == left_neighbor(self.seat))
            .map(|d| d.tile)
    }

    pub fn is_wildcard(&self, tile: Tile) -> bool {
        self.wildcard.matches(tile)
    }

    /// Winning arrangement of the current 15 tiles, if one exists.
    pub fn winning_hand(&self) -> Option<WinningHand> {
        if self.hand.len() != ACTIVE_HAND_SIZE {
            return None;
        }
        check_winning(&self.hand, self.wildcard, self.search_budget).ok().flatten()
    }

    /// The resting 14 tiles already form seven pairs.
    pub fn holds_seven_pairs(&self) -> bool {
        !self.has_drawn
            && self.hand.len() == RESTING_HAND_SIZE
            && matches!(check_pairs_winning(&self.hand, self.wildcard), Ok(Some(_)))
    }
}
