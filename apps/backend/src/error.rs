use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;

/// Failure body handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub code: String,
    pub title: String,
    pub detail: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Internal { detail }
            | AppError::Config { detail } => detail,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Game-state rejections are expected traffic; everything else is a fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::NotFound { .. } | AppError::Conflict { .. }
        )
    }

    pub fn problem(&self) -> Problem {
        let code = self.code().as_str();
        Problem {
            code: code.to_string(),
            title: Self::humanize_code(code),
            detail: self.detail().to_string(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn validation_code(kind: &ValidationKind) -> ErrorCode {
    match kind {
        ValidationKind::WrongTurn => ErrorCode::WrongTurn,
        ValidationKind::AlreadyDrawn => ErrorCode::AlreadyDrawn,
        ValidationKind::NotDrawnYet => ErrorCode::NotDrawnYet,
        ValidationKind::WrongHandSize => ErrorCode::WrongHandSize,
        ValidationKind::TileNotInHand => ErrorCode::TileNotInHand,
        ValidationKind::DeckEmpty => ErrorCode::DeckEmpty,
        ValidationKind::DiscardPileEmpty => ErrorCode::DiscardPileEmpty,
        ValidationKind::WrongDiscardOwner => ErrorCode::WrongDiscardOwner,
        ValidationKind::InvalidDecomposition => ErrorCode::InvalidDecomposition,
        ValidationKind::NotEnoughPlayers => ErrorCode::NotEnoughPlayers,
        ValidationKind::NotAllReady => ErrorCode::NotAllReady,
        ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
        ValidationKind::NotSeated => ErrorCode::NotSeated,
        ValidationKind::ParseTile => ErrorCode::ParseTile,
        ValidationKind::InvalidStartingPoints => ErrorCode::InvalidStartingPoints,
        ValidationKind::Other(_) => ErrorCode::ValidationError,
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => AppError::invalid(validation_code(&kind), detail),
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::TableFull => ErrorCode::TableFull,
                    ConflictKind::AlreadySeated => ErrorCode::AlreadySeated,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Table => ErrorCode::TableNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_validation_maps_to_matching_code() {
        let err: AppError =
            DomainError::validation(ValidationKind::WrongDiscardOwner, "seat 2 discarded").into();
        assert_eq!(err.code(), ErrorCode::WrongDiscardOwner);
        assert!(err.is_rejection());
        assert_eq!(err.detail(), "seat 2 discarded");
    }

    #[test]
    fn conflict_and_not_found_keep_their_kind() {
        let full: AppError = DomainError::conflict(ConflictKind::TableFull, "4 seats").into();
        assert_eq!(full.code(), ErrorCode::TableFull);

        let missing: AppError = DomainError::not_found(NotFoundKind::Table, "table 9").into();
        assert_eq!(missing.code(), ErrorCode::TableNotFound);
    }

    #[test]
    fn problem_body_humanizes_code() {
        let problem = AppError::invalid(ErrorCode::DeckEmpty, "no tiles left").problem();
        assert_eq!(problem.code, "DECK_EMPTY");
        assert_eq!(problem.title, "Deck Empty");
        assert_eq!(problem.detail, "no tiles left");
    }

    #[test]
    fn internal_errors_are_not_rejections() {
        assert!(!AppError::internal("lost seat").is_rejection());
        assert_eq!(AppError::config("bad grace").code(), ErrorCode::ConfigError);
    }
}
