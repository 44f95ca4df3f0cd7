//! Test-only game state builders for domain unit tests.

use crate::domain::parse_tiles;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{GameState, Phase, Seat};
use crate::domain::tiles_types::{Tile, Wildcard};

/// A dealt round with explicit hands written in tile notation.
///
/// The indicator is chosen so the wildcard is `wildcard` (e.g. `"G6"`).
pub fn round_with_hands(hands: [&str; PLAYERS], deck: &str, wildcard: &str, turn: Seat, has_drawn: bool) -> GameState {
    let wildcard_tile: Tile = wildcard.parse().unwrap();
    let (color, rank) = match wildcard_tile {
        Tile::Numbered { color, rank } => (color, rank.get()),
        Tile::Joker => panic!("wildcard must be numbered"),
    };
    let indicator = Tile::new(color, if rank == 1 { 13 } else { rank - 1 });

    let mut state = GameState::new(20);
    state.phase = Phase::Dealt;
    state.round_no = 1;
    state.hands = hands.map(|h| parse_tiles(h).unwrap());
    state.deck = parse_tiles(deck).unwrap();
    state.indicator = Some(indicator);
    state.wildcard = Wildcard::from_indicator(indicator);
    state.turn = Some(turn);
    state.has_drawn = has_drawn;
    state
}

/// Fourteen unremarkable tiles with no groups and no pairs.
pub const LOOSE_14: &str = "R1 R3 R5 R7 R9 R11 R13 B2 B4 B8 B10 B12 K1 K4";
/// The same loose tiles plus one more.
pub const LOOSE_15: &str = "R1 R3 R5 R7 R9 R11 R13 B2 B4 B8 B10 B12 K1 K4 K8";
