//! Per-viewer snapshot of a table. Hands are private: a viewer sees tile
//! counts for every seat and tiles only for their own.

use serde::Serialize;

use crate::domain::rules::PLAYERS;
use crate::domain::scoring::RoundOutcome;
use crate::domain::state::{left_neighbor, GameState, LastDiscard, Phase, Seat};
use crate::domain::tiles_logic::sort_hand;
use crate::domain::tiles_types::Tile;

/// Occupant facts the table service contributes per seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatOccupancy {
    pub user_id: i64,
    pub display_name: String,
    pub is_bot: bool,
    pub is_ready: bool,
    pub connected: bool,
}

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeatPublic {
    pub seat: Seat,
    pub user_id: Option<i64>,
    pub display_name: Option<String>,
    pub is_bot: bool,
    pub is_ready: bool,
    pub connected: bool,
    pub hand_size: usize,
    pub discard_pile: Vec<Tile>,
    pub score: i16,
}

/// The viewer's own seat and tiles.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewerHand {
    pub seat: Seat,
    pub hand: Vec<Tile>,
    /// The last discard is the viewer's to take right now.
    pub can_take_discard: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub table_id: i64,
    pub version: u64,
    pub phase: Phase,
    pub round_no: u32,
    pub starting_points: i16,
    pub seats: [SeatPublic; PLAYERS],
    pub turn: Option<Seat>,
    pub has_drawn: bool,
    pub deck_remaining: usize,
    pub indicator: Option<Tile>,
    pub wildcard: Option<Tile>,
    pub last_discard: Option<LastDiscard>,
    pub scores: [i16; PLAYERS],
    pub round_over: bool,
    pub match_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_outcome: Option<RoundOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerHand>,
}

pub fn snapshot(
    state: &GameState,
    table_id: i64,
    version: u64,
    occupancy: &[Option<SeatOccupancy>; PLAYERS],
    viewer: Option<Seat>,
) -> TableSnapshot {
    let seats = std::array::from_fn(|i| {
        let occupant = occupancy[i].as_ref();
        SeatPublic {
            seat: i as Seat,
            user_id: occupant.map(|o| o.user_id),
            display_name: occupant.map(|o| o.display_name.clone()),
            is_bot: occupant.is_some_and(|o| o.is_bot),
            is_ready: occupant.is_some_and(|o| o.is_ready),
            connected: occupant.is_some_and(|o| o.connected),
            hand_size: state.hands[i].len(),
            discard_pile: state.discards[i].clone(),
            score: state.scores[i],
        }
    });

    let viewer = viewer.filter(|&s| (s as usize) < PLAYERS).map(|seat| {
        let mut hand = state.hands[seat as usize].clone();
        sort_hand(&mut hand, state.wildcard);
        ViewerHand {
            seat,
            hand,
            can_take_discard: state.phase == Phase::Dealt
                && state.turn == Some(seat)
                && !state.has_drawn
                && state.last_discard.is_some_and(|d| d.seat == left_neighbor(seat)),
        }
    });

    TableSnapshot {
        table_id,
        version,
        phase: state.phase,
        round_no: state.round_no,
        starting_points: state.starting_points,
        seats,
        turn: state.turn,
        has_drawn: state.has_drawn,
        deck_remaining: state.deck.len(),
        indicator: state.indicator,
        wildcard: state.wildcard.map(|w| w.tile()),
        last_discard: state.last_discard,
        scores: state.scores,
        round_over: matches!(state.phase, Phase::RoundOver | Phase::MatchOver),
        match_over: state.phase == Phase::MatchOver,
        last_outcome: state.last_outcome.clone(),
        viewer,
    }
}
