//! Policy decisions on hand-built seat views.

use crate::ai::{BotAction, BotError, BotPolicy, Conservative, RandomPlayer};
use crate::domain::hand_analysis::SearchBudget;
use crate::domain::player_view::SeatView;
use crate::domain::state::LastDiscard;
use crate::domain::test_state_helpers::{round_with_hands, LOOSE_14, LOOSE_15};
use crate::domain::tiles_types::Tile;

const GROUPS_PLUS_K5: &str = "R1 R2 R3 R4 B7 K7 G7 K9 K10 K11 K5 B12 R12 K12 G12";
const SEVEN_PAIRS: &str = "R1 R1 B2 B2 K3 K3 G4 G4 R8 R8 B10 B10 K13 K13";

fn tile(s: &str) -> Tile {
    s.parse().unwrap()
}

fn view(hand: &str, has_drawn: bool) -> SeatView {
    let mut state = round_with_hands([LOOSE_14, hand, LOOSE_14, LOOSE_14], "B1 B3", "G6", 1, has_drawn);
    state.discards[0].push(tile("B9"));
    state.last_discard = Some(LastDiscard { tile: tile("B9"), seat: 0 });
    SeatView::for_turn(&state, 1, SearchBudget::default()).unwrap()
}

#[test]
fn conservative_ignores_takeable_discard() {
    let v = view(LOOSE_14, false);
    assert_eq!(v.takeable_discard(), Some(tile("B9")));
    assert_eq!(Conservative.choose_action(&v).unwrap(), BotAction::DrawFromDeck);
}

#[test]
fn conservative_claims_available_win() {
    let v = view(GROUPS_PLUS_K5, true);
    assert_eq!(Conservative.choose_action(&v).unwrap(), BotAction::ClaimWin);
}

#[test]
fn conservative_discards_least_duplicated_first_in_hand() {
    let v = view("R1 R1 R3 R5 R7 R9 R11 R13 B2 B4 B8 B10 B12 K1 K4", true);
    assert_eq!(Conservative.choose_action(&v).unwrap(), BotAction::Discard(tile("R3")));
}

#[test]
fn conservative_never_throws_a_wildcard() {
    let v = view("G6 R1 R3 R5 R7 R9 R11 R13 B2 B4 B8 B10 B12 K1 K4", true);
    assert_eq!(Conservative.choose_action(&v).unwrap(), BotAction::Discard(tile("R1")));

    let joker_first = view("JK R1 R3 R5 R7 R9 R11 R13 B2 B4 B8 B10 B12 K1 K4", true);
    assert_eq!(Conservative.choose_action(&joker_first).unwrap(), BotAction::Discard(tile("R1")));
}

#[test]
fn wrong_hand_size_has_no_legal_action() {
    let v = view(LOOSE_14, true);
    assert!(matches!(Conservative.choose_action(&v), Err(BotError::NoLegalAction(_))));
    assert!(matches!(RandomPlayer::new(Some(1)).choose_action(&v), Err(BotError::NoLegalAction(_))));
}

#[test]
fn random_player_stays_legal() {
    let bot = RandomPlayer::new(Some(7));
    let drawing = view(LOOSE_14, false);
    let discarding = view(LOOSE_15, true);
    let hand = discarding.hand.clone();

    for _ in 0..64 {
        let action = bot.choose_action(&drawing).unwrap();
        assert!(matches!(action, BotAction::DrawFromDeck | BotAction::DrawFromDiscard));

        match bot.choose_action(&discarding).unwrap() {
            BotAction::Discard(t) => {
                assert!(hand.contains(&t));
                assert!(!discarding.is_wildcard(t));
            }
            other => panic!("expected a discard, got {other:?}"),
        }
    }
}

#[test]
fn random_player_is_deterministic_per_seed() {
    let v = view(LOOSE_15, true);
    let a = RandomPlayer::new(Some(99));
    let b = RandomPlayer::new(Some(99));
    let seq_a: Vec<_> = (0..16).map(|_| a.choose_action(&v).unwrap()).collect();
    let seq_b: Vec<_> = (0..16).map(|_| b.choose_action(&v).unwrap()).collect();
    assert_eq!(seq_a, seq_b);
}

#[test]
fn random_player_claims_pairs_before_drawing() {
    let v = view(SEVEN_PAIRS, false);
    assert!(v.holds_seven_pairs());
    assert_eq!(RandomPlayer::new(Some(3)).choose_action(&v).unwrap(), BotAction::ClaimPairWin);
}
