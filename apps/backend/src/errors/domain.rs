//! Domain-level error type shared by the rule engine and the table services.
//!
//! This error type knows nothing about transports. Service entry points
//! return `Result<T, crate::error::AppError>` and convert with the provided
//! `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why a game action or input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    WrongTurn,
    AlreadyDrawn,
    NotDrawnYet,
    WrongHandSize,
    TileNotInHand,
    DeckEmpty,
    DiscardPileEmpty,
    WrongDiscardOwner,
    InvalidDecomposition,
    NotEnoughPlayers,
    NotAllReady,
    PhaseMismatch,
    NotSeated,
    ParseTile,
    InvalidStartingPoints,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Table,
    Player,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    TableFull,
    AlreadySeated,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Rule violation or malformed client input; state is left untouched
    Validation(ValidationKind, String),
    /// Semantic conflict with the table's current occupancy
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// The validation kind, if this is a validation failure.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    pub fn is_validation(&self, kind: &ValidationKind) -> bool {
        self.validation_kind() == Some(kind)
    }
}
