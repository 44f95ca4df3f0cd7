use serde::Serialize;

use crate::domain::rules::{PLAYERS, RESTING_HAND_SIZE};
use crate::domain::scoring::RoundOutcome;
use crate::domain::tiles_types::{Tile, Wildcard};
use crate::errors::domain::{DomainError, ValidationKind};

pub type Seat = u8; // 0..=3

/// Table lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Nobody seated.
    Empty,
    /// One to four players seated, not all ready.
    Seating,
    /// Four players seated and ready.
    Ready,
    /// A round is being played.
    Dealt,
    /// A round ended; scores carried into the next one.
    RoundOver,
    /// A score reached zero.
    MatchOver,
}

impl Phase {
    /// Phases in which seats may change hands.
    pub fn is_lobby(self) -> bool {
        matches!(self, Phase::Empty | Phase::Seating | Phase::Ready | Phase::MatchOver)
    }
}

/// Lobby phase for the given occupancy.
pub fn lobby_phase(occupied: usize, all_ready: bool) -> Phase {
    match occupied {
        0 => Phase::Empty,
        n if n == PLAYERS && all_ready => Phase::Ready,
        _ => Phase::Seating,
    }
}

/// The single most recent discard, still eligible for pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastDiscard {
    pub tile: Tile,
    pub seat: Seat,
}

/// Everything the rule engine and turn logic need about one table.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    /// 1-based; 0 before the first deal.
    pub round_no: u32,
    pub deck: Vec<Tile>,
    pub hands: [Vec<Tile>; PLAYERS],
    pub discards: [Vec<Tile>; PLAYERS],
    /// Cleared once taken; only this tile may be drawn from a discard pile.
    pub last_discard: Option<LastDiscard>,
    /// Seat expected to act; `None` outside an active round.
    pub turn: Option<Seat>,
    pub has_drawn: bool,
    pub indicator: Option<Tile>,
    pub wildcard: Option<Wildcard>,
    pub starting_points: i16,
    /// Points left per seat; the match ends when one reaches 0.
    pub scores: [i16; PLAYERS],
    /// Completed discards this round.
    pub turns_taken: u32,
    pub last_outcome: Option<RoundOutcome>,
}

impl GameState {
    pub fn new(starting_points: i16) -> Self {
        Self {
            phase: Phase::Empty,
            round_no: 0,
            deck: Vec::new(),
            hands: Default::default(),
            discards: Default::default(),
            last_discard: None,
            turn: None,
            has_drawn: false,
            indicator: None,
            wildcard: None,
            starting_points,
            scores: [starting_points; PLAYERS],
            turns_taken: 0,
            last_outcome: None,
        }
    }

    /// Count of every tile across deck, hands, discard piles and indicator.
    pub fn tiles_in_play(&self) -> usize {
        self.deck.len()
            + self.hands.iter().map(Vec::len).sum::<usize>()
            + self.discards.iter().map(Vec::len).sum::<usize>()
            + usize::from(self.indicator.is_some())
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    ((seat as i16 + delta as i16).rem_euclid(PLAYERS as i16)) as Seat
}

/// Seat that plays after `seat`.
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// The only seat whose discard `seat` may pick up.
#[inline]
pub fn left_neighbor(seat: Seat) -> Seat {
    seat_offset(seat, -1)
}

pub fn require_phase(state: &GameState, expected: Phase) -> Result<(), DomainError> {
    if state.phase != expected {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("table is {:?}, expected {expected:?}", state.phase),
        ));
    }
    Ok(())
}

pub fn require_turn(state: &GameState, seat: Seat) -> Result<(), DomainError> {
    match state.turn {
        Some(turn) if turn == seat => Ok(()),
        Some(turn) => Err(DomainError::validation(
            ValidationKind::WrongTurn,
            format!("seat {turn} is to act, not seat {seat}"),
        )),
        None => Err(DomainError::validation(ValidationKind::WrongTurn, "nobody is to act")),
    }
}

pub fn require_hand_size(state: &GameState, seat: Seat, expected: usize) -> Result<(), DomainError> {
    let actual = hand(state, seat)?.len();
    if actual != expected {
        return Err(DomainError::validation(
            ValidationKind::WrongHandSize,
            format!("seat {seat} holds {actual} tiles, expected {expected}"),
        ));
    }
    Ok(())
}

pub fn require_wildcard(state: &GameState, ctx: &'static str) -> Result<Wildcard, DomainError> {
    state.wildcard.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: wildcard must be set ({ctx})"))
    })
}

pub fn hand(state: &GameState, seat: Seat) -> Result<&Vec<Tile>, DomainError> {
    state
        .hands
        .get(seat as usize)
        .ok_or_else(|| DomainError::validation_other(format!("seat {seat} out of range")))
}

pub fn hand_mut(state: &mut GameState, seat: Seat) -> Result<&mut Vec<Tile>, DomainError> {
    state
        .hands
        .get_mut(seat as usize)
        .ok_or_else(|| DomainError::validation_other(format!("seat {seat} out of range")))
}

/// Resting-size hand check shared by both draw actions.
pub(crate) fn require_resting_hand(state: &GameState, seat: Seat) -> Result<(), DomainError> {
    require_hand_size(state, seat, RESTING_HAND_SIZE)
}
