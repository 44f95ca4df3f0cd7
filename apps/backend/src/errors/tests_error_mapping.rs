// Every domain rejection reaches clients with its own code.
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::AppError;

#[test]
fn each_validation_kind_has_a_distinct_code() {
    let cases = [
        (ValidationKind::WrongTurn, ErrorCode::WrongTurn),
        (ValidationKind::AlreadyDrawn, ErrorCode::AlreadyDrawn),
        (ValidationKind::NotDrawnYet, ErrorCode::NotDrawnYet),
        (ValidationKind::WrongHandSize, ErrorCode::WrongHandSize),
        (ValidationKind::TileNotInHand, ErrorCode::TileNotInHand),
        (ValidationKind::DeckEmpty, ErrorCode::DeckEmpty),
        (ValidationKind::DiscardPileEmpty, ErrorCode::DiscardPileEmpty),
        (ValidationKind::WrongDiscardOwner, ErrorCode::WrongDiscardOwner),
        (ValidationKind::InvalidDecomposition, ErrorCode::InvalidDecomposition),
        (ValidationKind::NotEnoughPlayers, ErrorCode::NotEnoughPlayers),
        (ValidationKind::NotAllReady, ErrorCode::NotAllReady),
        (ValidationKind::PhaseMismatch, ErrorCode::PhaseMismatch),
        (ValidationKind::NotSeated, ErrorCode::NotSeated),
        (ValidationKind::ParseTile, ErrorCode::ParseTile),
        (ValidationKind::InvalidStartingPoints, ErrorCode::InvalidStartingPoints),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind.clone(), "rejected").into();
        assert_eq!(app.code(), code, "{kind:?}");
        assert!(matches!(app, AppError::Validation { .. }));
    }
}

#[test]
fn other_kinds_fall_back_to_generic_codes() {
    let app: AppError = DomainError::validation_other("odd input").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);

    let app: AppError =
        DomainError::conflict(ConflictKind::Other("SEAT_AUTOMATED".into()), "bot seat").into();
    assert_eq!(app.code(), ErrorCode::Conflict);
    assert_eq!(app.detail(), "bot seat");

    let app: AppError = DomainError::not_found(NotFoundKind::Other("round".into()), "gone").into();
    assert_eq!(app.code(), ErrorCode::NotFound);
}

#[test]
fn seat_conflicts_and_lookups() {
    let app: AppError = DomainError::conflict(ConflictKind::AlreadySeated, "seat 1").into();
    assert_eq!(app.code().as_str(), "ALREADY_SEATED");

    let app: AppError = DomainError::not_found(NotFoundKind::Player, "user 7").into();
    assert_eq!(app.code().as_str(), "PLAYER_NOT_FOUND");
    assert!(app.is_rejection());
}

#[test]
fn domain_helpers_expose_kind() {
    let err = DomainError::validation(ValidationKind::DeckEmpty, "empty");
    assert!(err.is_validation(&ValidationKind::DeckEmpty));
    assert_eq!(err.validation_kind(), Some(&ValidationKind::DeckEmpty));

    let conflict = DomainError::conflict(ConflictKind::TableFull, "full");
    assert_eq!(conflict.validation_kind(), None);
    assert_eq!(conflict.to_string(), "conflict TableFull: full");
}
