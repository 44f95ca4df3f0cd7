//! Table-wide constants of the game.

pub const PLAYERS: usize = 4;

/// Hand size between turns.
pub const RESTING_HAND_SIZE: usize = 14;
/// Hand size after drawing (and the starting seat's dealt hand).
pub const ACTIVE_HAND_SIZE: usize = 15;

pub const COPIES_PER_TILE: usize = 2;
pub const JOKERS: usize = 2;
/// 4 colors x 13 ranks x 2 copies + 2 jokers.
pub const TILE_SET_SIZE: usize = 4 * 13 * COPIES_PER_TILE + JOKERS;
/// Tiles left in the draw pile right after dealing.
pub const DECK_AFTER_DEAL: usize = TILE_SET_SIZE - 1 - ACTIVE_HAND_SIZE - 3 * RESTING_HAND_SIZE;

pub const MIN_GROUP_SIZE: usize = 3;
pub const MAX_GROUP_SIZE: usize = 4;
pub const PAIRS_TO_WIN: usize = RESTING_HAND_SIZE / 2;

/// Points every other seat loses on a plain win.
pub const BASE_PENALTY: i16 = 2;
/// Multiplier when the finishing discard is itself a wildcard.
pub const WILDCARD_FINISH_MULTIPLIER: i16 = 4;
/// Points every other seat loses on a seven-pairs win.
pub const PAIR_WIN_PENALTY: i16 = 4;

pub const STARTING_POINTS_CHOICES: [i16; 3] = [5, 13, 20];
pub const DEFAULT_STARTING_POINTS: i16 = 20;

pub fn valid_starting_points(points: i16) -> bool {
    STARTING_POINTS_CHOICES.contains(&points)
}
