//! Error codes for the okey table engine.
//!
//! Every failure that leaves the engine carries one of these codes. Add new
//! codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! the transport layer forwards to clients.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn and hand rules
    /// Action attempted by a seat that does not hold the turn
    WrongTurn,
    /// Seat already drew this turn
    AlreadyDrawn,
    /// Seat must draw before discarding
    NotDrawnYet,
    /// Hand is not the size the action requires
    WrongHandSize,
    /// Tile is not in the seat's hand
    TileNotInHand,
    /// Draw pile is empty
    DeckEmpty,
    /// There is no discard to take
    DiscardPileEmpty,
    /// The last discard was not placed by the left neighbor
    WrongDiscardOwner,
    /// Hand cannot be arranged into a winning shape
    InvalidDecomposition,

    // Lifecycle
    /// Fewer than four players are seated
    NotEnoughPlayers,
    /// At least one seated player is not ready
    NotAllReady,
    /// Action not legal in the table's current phase
    PhaseMismatch,
    /// Player does not occupy a seat at the table
    NotSeated,

    // Input
    /// Malformed tile notation
    ParseTile,
    /// Starting points outside the allowed choices
    InvalidStartingPoints,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Table not found
    TableNotFound,
    /// Player not found
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// All four seats are occupied
    TableFull,
    /// Player is already seated at this table
    AlreadySeated,
    /// General conflict
    Conflict,

    // System Errors
    /// Internal invariant violated
    Internal,
    /// Invalid configuration
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WrongTurn => "WRONG_TURN",
            Self::AlreadyDrawn => "ALREADY_DRAWN",
            Self::NotDrawnYet => "NOT_DRAWN_YET",
            Self::WrongHandSize => "WRONG_HAND_SIZE",
            Self::TileNotInHand => "TILE_NOT_IN_HAND",
            Self::DeckEmpty => "DECK_EMPTY",
            Self::DiscardPileEmpty => "DISCARD_PILE_EMPTY",
            Self::WrongDiscardOwner => "WRONG_DISCARD_OWNER",
            Self::InvalidDecomposition => "INVALID_DECOMPOSITION",

            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::NotAllReady => "NOT_ALL_READY",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::NotSeated => "NOT_SEATED",

            Self::ParseTile => "PARSE_TILE",
            Self::InvalidStartingPoints => "INVALID_STARTING_POINTS",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::TableNotFound => "TABLE_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::TableFull => "TABLE_FULL",
            Self::AlreadySeated => "ALREADY_SEATED",
            Self::Conflict => "CONFLICT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for registry-wide checks.
    pub const ALL: [ErrorCode; 24] = [
        Self::WrongTurn,
        Self::AlreadyDrawn,
        Self::NotDrawnYet,
        Self::WrongHandSize,
        Self::TileNotInHand,
        Self::DeckEmpty,
        Self::DiscardPileEmpty,
        Self::WrongDiscardOwner,
        Self::InvalidDecomposition,
        Self::NotEnoughPlayers,
        Self::NotAllReady,
        Self::PhaseMismatch,
        Self::NotSeated,
        Self::ParseTile,
        Self::InvalidStartingPoints,
        Self::ValidationError,
        Self::TableNotFound,
        Self::PlayerNotFound,
        Self::NotFound,
        Self::TableFull,
        Self::AlreadySeated,
        Self::Conflict,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
