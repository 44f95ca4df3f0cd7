//! Bot policy trait definition.

use std::fmt;

use crate::domain::player_view::SeatView;
use crate::domain::tiles_types::Tile;
use crate::error::AppError;

/// Errors that can occur during bot decision-making.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    /// The view does not allow any action (e.g. wrong hand size)
    NoLegalAction(String),
    /// The policy encountered an internal error
    Internal(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::NoLegalAction(msg) => write!(f, "bot has no legal action: {msg}"),
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<BotError> for AppError {
    fn from(err: BotError) -> Self {
        AppError::internal(format!("bot error: {err}"))
    }
}

/// One step of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    DrawFromDeck,
    DrawFromDiscard,
    /// Finish with 15 tiles (groups or pairs).
    ClaimWin,
    /// Finish with seven pairs before drawing.
    ClaimPairWin,
    Discard(Tile),
}

/// Trait for automated players.
///
/// Called only on the controlled seat's turn, once per step: a turn is a
/// draw followed by a discard or a claim. Implementations must return a legal
/// action for the given view and may use the view's rule helpers.
pub trait BotPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn choose_action(&self, view: &SeatView) -> Result<BotAction, BotError>;
}
