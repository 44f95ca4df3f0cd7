//! The default substitute policy: legal, predictable, never clever.

use std::collections::HashMap;

use tracing::debug;

use super::trait_def::{BotAction, BotError, BotPolicy};
use crate::domain::player_view::SeatView;
use crate::domain::tiles_types::Tile;

/// Draws only from the deck, claims any win the rule engine finds, and
/// otherwise throws the least duplicated non-wildcard tile.
#[derive(Debug, Default, Clone, Copy)]
pub struct Conservative;

impl Conservative {
    pub const NAME: &'static str = "Conservative";
    pub const VERSION: &'static str = "1.0.0";

    /// The policy is deterministic; the seed is accepted to fit the registry
    /// factory signature and ignored.
    pub fn new(_seed: Option<u64>) -> Self {
        Self
    }
}

impl BotPolicy for Conservative {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_action(&self, view: &SeatView) -> Result<BotAction, BotError> {
        if view.must_draw() {
            return Ok(BotAction::DrawFromDeck);
        }
        if !view.must_discard() {
            return Err(BotError::NoLegalAction(format!(
                "seat {} holds {} tiles (drawn: {})",
                view.seat,
                view.hand.len(),
                view.has_drawn
            )));
        }
        if let Some(win) = view.winning_hand() {
            debug!(seat = view.seat, discarded = %win.discarded, "bot claims win");
            return Ok(BotAction::ClaimWin);
        }
        least_duplicated(view)
            .map(BotAction::Discard)
            .ok_or_else(|| BotError::NoLegalAction("hand holds nothing to discard".into()))
    }
}

/// Non-wildcard tile with the fewest copies in hand; ties go to the earliest.
/// Falls back to the first tile when the hand is all wildcards.
pub(crate) fn least_duplicated(view: &SeatView) -> Option<Tile> {
    let mut copies: HashMap<Tile, usize> = HashMap::new();
    for &t in &view.hand {
        *copies.entry(t).or_insert(0) += 1;
    }

    let mut best: Option<(usize, Tile)> = None;
    for &t in view.hand.iter().filter(|&&t| !view.is_wildcard(t)) {
        let n = copies[&t];
        if best.is_none_or(|(m, _)| n < m) {
            best = Some((n, t));
        }
    }
    best.map(|(_, t)| t).or_else(|| view.hand.first().copied())
}
