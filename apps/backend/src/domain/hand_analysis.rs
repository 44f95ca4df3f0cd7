//! Backtracking decomposition of a hand into valid groups.
//!
//! The search always anchors on the first unplaced tile, so every tile is
//! placed exactly once and no partition is visited twice in a different
//! order. Partners that cannot share a group with the anchor are filtered
//! out before combinations are generated, identical combinations (same
//! physical values) are tried once, and remainders whose size cannot be
//! split into 3s and 4s are abandoned immediately. Wildcard-heavy hands can
//! still explode, so every search runs under a [`SearchBudget`].

use std::collections::HashSet;

use tracing::warn;

use super::groups::is_valid_group;
use super::rules::{MAX_GROUP_SIZE, MIN_GROUP_SIZE, RESTING_HAND_SIZE};
use super::tiles_types::{Rank, Tile, Wildcard};
use crate::errors::domain::{DomainError, ValidationKind};

/// Upper bound on search nodes for one decomposition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub max_nodes: u32,
}

impl SearchBudget {
    pub const DEFAULT_MAX_NODES: u32 = 250_000;

    pub const fn new(max_nodes: u32) -> Self {
        Self { max_nodes }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_NODES)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandAnalysis {
    /// Every tile placed in exactly one valid group.
    Complete { groups: Vec<Vec<Tile>> },
    /// The search space was exhausted without a full decomposition.
    Incomplete,
    /// The node budget ran out first; treated as not decomposable.
    SearchExhausted { nodes: u32 },
}

impl HandAnalysis {
    pub fn is_valid(&self) -> bool {
        matches!(self, HandAnalysis::Complete { .. })
    }

    pub fn groups(&self) -> Option<&[Vec<Tile>]> {
        match self {
            HandAnalysis::Complete { groups } => Some(groups),
            _ => None,
        }
    }

    pub fn into_groups(self) -> Option<Vec<Vec<Tile>>> {
        match self {
            HandAnalysis::Complete { groups } => Some(groups),
            _ => None,
        }
    }
}

pub(crate) fn require_size(hand: &[Tile], expected: usize) -> Result<(), DomainError> {
    if hand.len() != expected {
        return Err(DomainError::validation(
            ValidationKind::WrongHandSize,
            format!("hand has {} tiles, expected {expected}", hand.len()),
        ));
    }
    Ok(())
}

/// Partition a 14-tile hand into valid groups of 3 or 4 covering every tile.
///
/// Any other hand size is rejected with `WrongHandSize` before searching.
pub fn analyze_hand(
    tiles: &[Tile],
    wildcard: Wildcard,
    budget: SearchBudget,
) -> Result<HandAnalysis, DomainError> {
    require_size(tiles, RESTING_HAND_SIZE)?;
    Ok(decompose(tiles, wildcard, budget))
}

fn decompose(tiles: &[Tile], wildcard: Wildcard, budget: SearchBudget) -> HandAnalysis {

    // Concrete tiles first so the anchor is never a wildcard while any
    // concrete tile is left to place.
    let mut ordered = tiles.to_vec();
    ordered.sort_by_key(|&t| (wildcard.matches(t), t));

    let mut search = Search {
        wildcard,
        budget,
        nodes: 0,
        exhausted: false,
    };
    let mut groups = Vec::with_capacity(tiles.len() / MIN_GROUP_SIZE);
    if search.place(&ordered, &mut groups) {
        return HandAnalysis::Complete { groups };
    }
    if search.exhausted {
        warn!(
            nodes = search.nodes,
            max_nodes = budget.max_nodes,
            "hand analysis hit its search budget"
        );
        return HandAnalysis::SearchExhausted { nodes: search.nodes };
    }
    HandAnalysis::Incomplete
}

/// Whether `n` tiles can be split into groups of 3 and 4.
fn splits_into_groups(n: usize) -> bool {
    !matches!(n, 1 | 2 | 5)
}

struct Search {
    wildcard: Wildcard,
    budget: SearchBudget,
    nodes: u32,
    exhausted: bool,
}

impl Search {
    fn place(&mut self, remaining: &[Tile], groups: &mut Vec<Vec<Tile>>) -> bool {
        if remaining.is_empty() {
            return true;
        }
        if self.nodes >= self.budget.max_nodes {
            self.exhausted = true;
            return false;
        }
        self.nodes += 1;

        let anchor = remaining[0];
        if self.wildcard.matches(anchor) {
            // Only wildcards left: no group can anchor on them.
            return false;
        }

        let partners: Vec<usize> = (1..remaining.len())
            .filter(|&i| self.can_share_group(anchor, remaining[i]))
            .collect();

        for size in MIN_GROUP_SIZE..=MAX_GROUP_SIZE {
            let rest_len = remaining.len().saturating_sub(size);
            if size > remaining.len() || !(rest_len == 0 || splits_into_groups(rest_len)) {
                continue;
            }
            let mut tried: HashSet<Vec<Tile>> = HashSet::new();
            for combo in combinations(&partners, size - 1) {
                let mut group = Vec::with_capacity(size);
                group.push(anchor);
                group.extend(combo.iter().map(|&i| remaining[i]));

                let mut key = group.clone();
                key.sort_unstable();
                if !tried.insert(key) || !is_valid_group(&group, self.wildcard) {
                    continue;
                }

                let rest: Vec<Tile> = remaining
                    .iter()
                    .enumerate()
                    .skip(1)
                    .filter(|(i, _)| !combo.contains(i))
                    .map(|(_, &t)| t)
                    .collect();

                groups.push(group);
                if self.place(&rest, groups) {
                    return true;
                }
                groups.pop();
                if self.exhausted {
                    return false;
                }
            }
        }
        false
    }

    /// Cheap pre-filter: could `other` ever sit in a group with `anchor`?
    fn can_share_group(&self, anchor: Tile, other: Tile) -> bool {
        if self.wildcard.matches(other) {
            return true;
        }
        let (Tile::Numbered { color: ac, rank: ar }, Tile::Numbered { color: oc, rank: or }) = (anchor, other)
        else {
            return false;
        };
        if ar == or {
            // Sets need distinct colors; a same-color duplicate fits nowhere.
            return ac != oc;
        }
        ac == oc && within_run_reach(ar, or)
    }
}

/// Ranks close enough to share a run of at most four tiles, counting the
/// 11-12-13-1 wrap.
fn within_run_reach(a: Rank, b: Rank) -> bool {
    let (a, b) = (a.get(), b.get());
    let reach = (MAX_GROUP_SIZE - 1) as u8;
    if a.abs_diff(b) <= reach {
        return true;
    }
    let (low, high) = (a.min(b), a.max(b));
    low == Rank::MIN && high >= Rank::MAX + 1 - reach
}

/// All `k`-element combinations of `items`, in lexicographic index order.
fn combinations(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    fn extend(items: &[usize], k: usize, start: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        let needed = k - current.len();
        for i in start..=items.len().saturating_sub(needed) {
            if i >= items.len() {
                break;
            }
            current.push(items[i]);
            extend(items, k, i + 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if k <= items.len() {
        extend(items, k, 0, &mut Vec::with_capacity(k), &mut out);
    }
    out
}
