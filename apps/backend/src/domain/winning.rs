//! Win detection: group-wins over 15 tiles and seven-pairs wins.

use serde::Serialize;
use tracing::debug;

use super::hand_analysis::{analyze_hand, require_size, HandAnalysis, SearchBudget};
use super::rules::{ACTIVE_HAND_SIZE, PAIRS_TO_WIN, RESTING_HAND_SIZE};
use super::tiles_types::{Tile, Wildcard};
use crate::errors::domain::DomainError;

/// How the kept tiles are arranged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tiles", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Arrangement {
    Groups(Vec<Vec<Tile>>),
    Pairs(Vec<[Tile; 2]>),
}

/// A winning 15-tile hand: one tile goes out, the other 14 are arranged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinningHand {
    pub discarded: Tile,
    pub arrangement: Arrangement,
    /// The kept 14 tiles contain at least one wildcard.
    pub used_wildcard: bool,
}

impl WinningHand {
    pub fn is_pairs(&self) -> bool {
        matches!(self.arrangement, Arrangement::Pairs(_))
    }
}

/// Try every tile of a 15-tile hand as the finishing discard.
///
/// Group arrangements are searched over all 15 candidates before any pairs
/// arrangement is considered, so a hand that admits both always reports the
/// group win. Candidates equal to an earlier candidate leave the same 14
/// tiles behind and are skipped.
pub fn check_winning(
    hand: &[Tile],
    wildcard: Wildcard,
    budget: SearchBudget,
) -> Result<Option<WinningHand>, DomainError> {
    require_size(hand, ACTIVE_HAND_SIZE)?;

    let candidates = distinct_candidates(hand);
    for &idx in &candidates {
        let kept = without(hand, idx);
        match analyze_hand(&kept, wildcard, budget)? {
            HandAnalysis::Complete { groups } => {
                return Ok(Some(WinningHand {
                    discarded: hand[idx],
                    arrangement: Arrangement::Groups(groups),
                    used_wildcard: kept.iter().any(|&t| wildcard.matches(t)),
                }));
            }
            HandAnalysis::SearchExhausted { nodes } => {
                debug!(candidate = %hand[idx], nodes, "skipping candidate after search budget ran out");
            }
            HandAnalysis::Incomplete => {}
        }
    }

    for &idx in &candidates {
        let kept = without(hand, idx);
        if let Some(pairs) = check_pairs_winning(&kept, wildcard)? {
            return Ok(Some(WinningHand {
                discarded: hand[idx],
                arrangement: Arrangement::Pairs(pairs),
                used_wildcard: kept.iter().any(|&t| wildcard.matches(t)),
            }));
        }
    }
    Ok(None)
}

/// Partition a 14-tile hand into seven pairs.
///
/// A pair is two identical concrete tiles, a concrete tile with a wildcard,
/// or two wildcards. Exact matches are preferred so wildcards are only spent
/// on tiles that have no twin.
pub fn check_pairs_winning(hand: &[Tile], wildcard: Wildcard) -> Result<Option<Vec<[Tile; 2]>>, DomainError> {
    require_size(hand, RESTING_HAND_SIZE)?;

    let (mut concrete, mut wild): (Vec<Tile>, Vec<Tile>) = hand.iter().partition(|&&t| !wildcard.matches(t));
    let mut pairs = Vec::with_capacity(PAIRS_TO_WIN);

    while let Some(tile) = take_first(&mut concrete) {
        if let Some(twin) = concrete.iter().position(|&t| t == tile) {
            pairs.push([tile, concrete.remove(twin)]);
        } else if let Some(w) = take_first(&mut wild) {
            pairs.push([tile, w]);
        } else {
            return Ok(None);
        }
    }
    while wild.len() >= 2 {
        let a = wild.remove(0);
        let b = wild.remove(0);
        pairs.push([a, b]);
    }

    Ok((pairs.len() == PAIRS_TO_WIN && wild.is_empty()).then_some(pairs))
}

fn take_first(tiles: &mut Vec<Tile>) -> Option<Tile> {
    (!tiles.is_empty()).then(|| tiles.remove(0))
}

/// Indices of the first occurrence of every distinct tile, in hand order.
fn distinct_candidates(hand: &[Tile]) -> Vec<usize> {
    (0..hand.len())
        .filter(|&i| !hand[..i].contains(&hand[i]))
        .collect()
}

fn without(hand: &[Tile], idx: usize) -> Vec<Tile> {
    hand.iter()
        .enumerate()
        .filter(|&(i, _)| i != idx)
        .map(|(_, &t)| t)
        .collect()
}
