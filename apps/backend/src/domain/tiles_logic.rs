//! Tile helpers shared by the rule engine, the bots and the snapshots.

use serde::Serialize;

use super::tiles_types::{Tile, Wildcard};

pub fn is_wildcard(tile: Tile, wildcard: Wildcard) -> bool {
    wildcard.matches(tile)
}

/// Concrete tiles (in input order) and the number of wildcards among `tiles`.
pub fn split_wildcards(tiles: &[Tile], wildcard: Wildcard) -> (Vec<Tile>, usize) {
    let mut concrete = Vec::with_capacity(tiles.len());
    let mut wild = 0;
    for &t in tiles {
        if wildcard.matches(t) {
            wild += 1;
        } else {
            concrete.push(t);
        }
    }
    (concrete, wild)
}

/// Remove the first occurrence of `tile`. Returns false when absent.
pub fn remove_tile(hand: &mut Vec<Tile>, tile: Tile) -> bool {
    match hand.iter().position(|&t| t == tile) {
        Some(idx) => {
            hand.remove(idx);
            true
        }
        None => false,
    }
}

/// Display order: color then rank, wildcards at the end.
pub fn sort_hand(hand: &mut [Tile], wildcard: Option<Wildcard>) {
    hand.sort_by_key(|&t| (wildcard.is_some_and(|wc| wc.matches(t)), t));
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandSummary {
    pub total: usize,
    pub wildcards: usize,
    pub tiles: String,
}

/// Compact description of a hand for debug logs.
pub fn hand_summary(hand: &[Tile], wildcard: Option<Wildcard>) -> HandSummary {
    let mut sorted = hand.to_vec();
    sort_hand(&mut sorted, wildcard);
    HandSummary {
        total: hand.len(),
        wildcards: wildcard.map_or(0, |wc| hand.iter().filter(|&&t| wc.matches(t)).count()),
        tiles: sorted
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
    }
}
