//! Tile set construction, shuffling and dealing.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::rules::{ACTIVE_HAND_SIZE, COPIES_PER_TILE, JOKERS, PLAYERS, RESTING_HAND_SIZE, TILE_SET_SIZE};
use super::state::Seat;
use super::tiles_types::{Color, Rank, Tile, Wildcard};
use crate::errors::domain::{DomainError, ValidationKind};

/// The full 106-tile set in canonical order.
pub fn full_tile_set() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(TILE_SET_SIZE);
    for color in Color::ALL {
        for rank in Rank::all() {
            for _ in 0..COPIES_PER_TILE {
                tiles.push(Tile::Numbered { color, rank });
            }
        }
    }
    tiles.extend(std::iter::repeat_n(Tile::Joker, JOKERS));
    tiles
}

/// Remove and return the first non-joker tile of the shuffled deck.
pub fn take_indicator(deck: &mut Vec<Tile>) -> Option<Tile> {
    let idx = deck.iter().position(|t| !t.is_joker())?;
    Some(deck.remove(idx))
}

/// Everything a fresh round starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealtRound {
    pub deck: Vec<Tile>,
    pub hands: [Vec<Tile>; PLAYERS],
    pub indicator: Tile,
    pub wildcard: Wildcard,
    pub starting_seat: Seat,
}

/// Shuffle a full set with `seed`, draw the indicator, pick the starting seat
/// uniformly and deal it 15 tiles (14 to everyone else).
pub fn deal_round(seed: u64) -> Result<DealtRound, DomainError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut deck = full_tile_set();
    deck.shuffle(&mut rng);

    let indicator = take_indicator(&mut deck)
        .ok_or_else(|| DomainError::validation_other("tile set has no numbered tile"))?;
    let wildcard = Wildcard::from_indicator(indicator)
        .ok_or_else(|| DomainError::validation_other("indicator must be numbered"))?;

    let starting_seat = rng.random_range(0..PLAYERS) as Seat;
    let mut hands: [Vec<Tile>; PLAYERS] = Default::default();
    for (seat, hand) in hands.iter_mut().enumerate() {
        let size = if seat == starting_seat as usize {
            ACTIVE_HAND_SIZE
        } else {
            RESTING_HAND_SIZE
        };
        if deck.len() < size {
            return Err(DomainError::validation(
                ValidationKind::DeckEmpty,
                format!("cannot deal {size} tiles from {}", deck.len()),
            ));
        }
        *hand = deck.drain(..size).collect();
    }

    Ok(DealtRound {
        deck,
        hands,
        indicator,
        wildcard,
        starting_seat,
    })
}
