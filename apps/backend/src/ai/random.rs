//! Random bot - makes random legal moves.
//!
//! [`RandomPlayer`] is the baseline policy for simulation and tests. It draws
//! from the deck or the takeable discard at random, claims any win the rule
//! engine finds, and otherwise discards a random non-wildcard tile.

use parking_lot::Mutex;
use rand::prelude::*;
use rand::rngs::StdRng;

use super::trait_def::{BotAction, BotError, BotPolicy};
use crate::domain::player_view::SeatView;

/// Bot that makes random legal moves.
///
/// Seed it for reproducible play:
///
/// ```rust,ignore
/// let seeded = RandomPlayer::new(Some(12345));
/// let entropy = RandomPlayer::new(None);
/// ```
pub struct RandomPlayer {
    /// `BotPolicy` methods take `&self`; the RNG needs mutable access.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl BotPolicy for RandomPlayer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_action(&self, view: &SeatView) -> Result<BotAction, BotError> {
        let mut rng = self.rng.lock();

        if view.must_draw() {
            if view.holds_seven_pairs() {
                return Ok(BotAction::ClaimPairWin);
            }
            if view.takeable_discard().is_some() && rng.random_bool(0.5) {
                return Ok(BotAction::DrawFromDiscard);
            }
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
        if view.winning_hand().is_some() {
            return Ok(BotAction::ClaimWin);
        }

        let plain: Vec<_> = view
            .hand
            .iter()
            .copied()
            .filter(|&t| !view.is_wildcard(t))
            .collect();
        let pool = if plain.is_empty() { &view.hand } else { &plain };
        pool.choose(&mut *rng)
            .copied()
            .map(BotAction::Discard)
            .ok_or_else(|| BotError::Internal("failed to choose a random discard".into()))
    }
}
