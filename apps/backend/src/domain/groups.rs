//! Group legality: runs and sets under wildcard substitution.

use super::rules::{MAX_GROUP_SIZE, MIN_GROUP_SIZE};
use super::tiles_logic::split_wildcards;
use super::tiles_types::{Rank, Tile, Wildcard};

/// Ranks allowed in the circular 11-12-13-1 run.
const CIRCULAR_RANKS: [u8; 4] = [1, 11, 12, 13];
/// Rank 1 counted after 13 in the circular run.
const ACE_HIGH: u8 = Rank::MAX + 1;

/// Consecutive ranks of one color, wildcards filling gaps.
///
/// 11-12-13-1 wraps; 13-1-2 does not. Surplus wildcards may extend the run
/// on either side but never past 1 or 13 outside the circular case.
pub fn is_valid_run(tiles: &[Tile], wildcard: Wildcard) -> bool {
    let len = tiles.len();
    if len < MIN_GROUP_SIZE {
        return false;
    }
    let (concrete, _) = split_wildcards(tiles, wildcard);
    let Some(first) = concrete.first() else {
        return false;
    };
    let color = first.color();
    if concrete.iter().any(|t| t.color() != color) {
        return false;
    }

    let mut ranks: Vec<u8> = concrete.iter().filter_map(|t| t.rank()).map(Rank::get).collect();
    ranks.sort_unstable();
    if ranks.windows(2).any(|w| w[0] == w[1]) {
        return false;
    }

    if wraps_through_thirteen(&ranks, len) {
        return true;
    }
    let (min, max) = (ranks[0], ranks[ranks.len() - 1]);
    if min == Rank::MIN && max == Rank::MAX {
        return false;
    }
    let span = usize::from(max - min) + 1;
    span <= len && len <= usize::from(Rank::MAX)
}

/// Circular run check on sorted, distinct ranks: the window must close on
/// the 1 and hold only ranks from 11-12-13-1.
fn wraps_through_thirteen(ranks: &[u8], len: usize) -> bool {
    if len > CIRCULAR_RANKS.len()
        || !ranks.contains(&Rank::MIN)
        || ranks.iter().any(|r| !CIRCULAR_RANKS.contains(r))
    {
        return false;
    }
    let lowest = ranks
        .iter()
        .map(|&r| if r == Rank::MIN { ACE_HIGH } else { r })
        .min()
        .unwrap_or(ACE_HIGH);
    usize::from(ACE_HIGH - lowest) < len
}

/// Same rank in distinct colors, wildcards filling missing colors.
pub fn is_valid_set(tiles: &[Tile], wildcard: Wildcard) -> bool {
    if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&tiles.len()) {
        return false;
    }
    let (concrete, _) = split_wildcards(tiles, wildcard);
    let Some(first) = concrete.first() else {
        return false;
    };
    let rank = first.rank();
    if concrete.iter().any(|t| t.rank() != rank) {
        return false;
    }
    let mut colors: Vec<_> = concrete.iter().filter_map(|t| t.color()).collect();
    colors.sort_unstable();
    colors.windows(2).all(|w| w[0] != w[1])
}

pub fn is_valid_group(tiles: &[Tile], wildcard: Wildcard) -> bool {
    is_valid_run(tiles, wildcard) || is_valid_set(tiles, wildcard)
}
