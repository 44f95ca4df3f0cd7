//! Turn legality, claims and round lifecycle on hand-built states.

use crate::domain::claims::{claim_pair_win, claim_win};
use crate::domain::hand_analysis::SearchBudget;
use crate::domain::parse_tiles;
use crate::domain::round::{start_match, start_next_round};
use crate::domain::scoring::{RoundOutcome, WinKind};
use crate::domain::state::{GameState, LastDiscard, Phase};
use crate::domain::test_state_helpers::{round_with_hands, LOOSE_14, LOOSE_15};
use crate::domain::tiles_types::{Color, Tile};
use crate::domain::turns::{discard, draw_from_deck, draw_from_discard, DeckDraw};
use crate::errors::domain::ValidationKind;

const GROUPS_PLUS_K5: &str = "R1 R2 R3 R4 B7 K7 G7 K9 K10 K11 K5 B12 R12 K12 G12";
const SEVEN_PAIRS: &str = "R1 R1 B2 B2 K3 K3 G4 G4 R8 R8 B10 B10 K13 K13";

fn kind_of(err: crate::errors::domain::DomainError) -> ValidationKind {
    err.validation_kind().cloned().expect("validation error")
}

fn tile(s: &str) -> Tile {
    s.parse().unwrap()
}

#[test]
fn starting_seat_discards_without_drawing() {
    let mut state = round_with_hands([LOOSE_15, LOOSE_14, LOOSE_14, LOOSE_14], "B1 B3", "G6", 0, true);

    let result = discard(&mut state, 0, tile("K8")).unwrap();
    assert_eq!(result.next_turn, 1);
    assert_eq!(state.turn, Some(1));
    assert!(!state.has_drawn);
    assert_eq!(state.hands[0].len(), 14);
    assert_eq!(state.discards[0], vec![tile("K8")]);
    assert_eq!(state.last_discard, Some(LastDiscard { tile: tile("K8"), seat: 0 }));
}

// Pickup follows the left-neighbor rule (seat - 1 mod 4): the seat that
// just discarded is the only owner the next seat may take from.
#[test]
fn next_seat_may_take_left_neighbors_discard_once() {
    let mut state = round_with_hands([LOOSE_15, LOOSE_14, LOOSE_14, LOOSE_14], "B1 B3", "G6", 0, true);
    discard(&mut state, 0, tile("K8")).unwrap();

    let taken = draw_from_discard(&mut state, 1).unwrap();
    assert_eq!(taken, tile("K8"));
    assert!(state.has_drawn);
    assert!(state.discards[0].is_empty());
    assert_eq!(state.last_discard, None);
    assert_eq!(state.hands[1].len(), 15);
    // Other hands untouched.
    assert_eq!(state.hands[0], parse_tiles(LOOSE_14).unwrap());
    assert_eq!(state.hands[2], parse_tiles(LOOSE_14).unwrap());
}

#[test]
fn discard_from_non_neighbor_is_rejected() {
    // Seat 2 to act, but the last discard belongs to seat 0.
    let mut state = round_with_hands([LOOSE_14, LOOSE_14, LOOSE_14, LOOSE_14], "B1 B3", "G6", 2, false);
    state.discards[0].push(tile("K8"));
    state.last_discard = Some(LastDiscard { tile: tile("K8"), seat: 0 });
    let before = state.clone();

    let err = draw_from_discard(&mut state, 2).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::WrongDiscardOwner);
    assert_eq!(state, before);
}

#[test]
fn taking_with_no_discard_is_rejected() {
    let mut state = round_with_hands([LOOSE_14, LOOSE_14, LOOSE_14, LOOSE_14], "B1", "G6", 1, false);
    let err = draw_from_discard(&mut state, 1).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::DiscardPileEmpty);
}

#[test]
fn out_of_turn_actions_are_rejected() {
    let mut state = round_with_hands([LOOSE_15, LOOSE_14, LOOSE_14, LOOSE_14], "B1", "G6", 0, true);
    let before = state.clone();
    assert_eq!(kind_of(draw_from_deck(&mut state, 1).unwrap_err()), ValidationKind::WrongTurn);
    assert_eq!(kind_of(draw_from_discard(&mut state, 2).unwrap_err()), ValidationKind::WrongTurn);
    assert_eq!(kind_of(discard(&mut state, 3, tile("R1")).unwrap_err()), ValidationKind::WrongTurn);
    assert_eq!(
        kind_of(claim_win(&mut state, 1, SearchBudget::default()).unwrap_err()),
        ValidationKind::WrongTurn
    );
    assert_eq!(state, before);
}

#[test]
fn draw_then_discard_cycle() {
    let mut state = round_with_hands([LOOSE_14, LOOSE_14, LOOSE_14, LOOSE_14], "B1 B3", "G6", 1, false);

    assert_eq!(kind_of(discard(&mut state, 1, tile("R1")).unwrap_err()), ValidationKind::NotDrawnYet);

    let drew = draw_from_deck(&mut state, 1).unwrap();
    assert_eq!(drew, DeckDraw::Drew(tile("B3")));
    assert!(state.has_drawn);
    assert_eq!(state.deck.len(), 1);
    assert_eq!(state.hands[0], parse_tiles(LOOSE_14).unwrap());

    assert_eq!(kind_of(draw_from_deck(&mut state, 1).unwrap_err()), ValidationKind::AlreadyDrawn);
    assert_eq!(kind_of(discard(&mut state, 1, tile("G9")).unwrap_err()), ValidationKind::TileNotInHand);

    discard(&mut state, 1, tile("B3")).unwrap();
    assert_eq!(state.turn, Some(2));
    assert!(!state.has_drawn);
    assert_eq!(state.turns_taken, 1);
}

#[test]
fn wrong_hand_size_blocks_draw() {
    let mut state = round_with_hands([LOOSE_15, LOOSE_14, LOOSE_14, LOOSE_14], "B1", "G6", 0, false);
    assert_eq!(kind_of(draw_from_deck(&mut state, 0).unwrap_err()), ValidationKind::WrongHandSize);
}

#[test]
fn empty_deck_ends_round_without_winner() {
    let mut state = round_with_hands([LOOSE_14, LOOSE_14, LOOSE_14, LOOSE_14], "", "G6", 3, false);
    let scores = state.scores;

    assert_eq!(draw_from_deck(&mut state, 3).unwrap(), DeckDraw::Exhausted);
    assert_eq!(state.phase, Phase::RoundOver);
    assert_eq!(state.turn, None);
    assert_eq!(state.scores, scores);
    assert_eq!(state.last_outcome, Some(RoundOutcome::Exhausted { round_no: 1 }));
}

#[test]
fn claim_win_scores_and_ends_round() {
    let mut state = round_with_hands([LOOSE_14, GROUPS_PLUS_K5, LOOSE_14, LOOSE_14], "B1", "G6", 1, true);

    let win = claim_win(&mut state, 1, SearchBudget::default()).unwrap();
    assert_eq!(win.winner, 1);
    assert_eq!(win.kind, WinKind::Plain);
    assert_eq!(win.discarded, Some(Tile::new(Color::Black, 5)));
    assert_eq!(win.penalty, 2);
    assert_eq!(win.score_changes, [-2, 0, -2, -2]);
    assert_eq!(state.scores, [18, 20, 18, 18]);
    assert_eq!(state.phase, Phase::RoundOver);
    assert_eq!(state.discards[1], vec![Tile::new(Color::Black, 5)]);
    assert_eq!(state.hands[1].len(), 14);
    assert!(!win.match_over);
}

#[test]
fn wildcard_finish_costs_eight() {
    // K5 is the wildcard and the first finishing candidate in hand order.
    let hand = "K5 R1 R2 R3 R4 B7 K7 G7 K9 K10 K11 B12 R12 K12 G12";
    let mut state = round_with_hands([LOOSE_14, hand, LOOSE_14, LOOSE_14], "B1", "K5", 1, true);
    let win = claim_win(&mut state, 1, SearchBudget::default()).unwrap();
    assert_eq!(win.kind, WinKind::WildcardFinish);
    assert_eq!(win.penalty, 8);
    assert_eq!(state.scores, [12, 20, 12, 12]);
}

#[test]
fn failed_claim_leaves_state_unchanged() {
    let mut state = round_with_hands([LOOSE_15, LOOSE_14, LOOSE_14, LOOSE_14], "B1", "G6", 0, true);
    let before = state.clone();
    let err = claim_win(&mut state, 0, SearchBudget::default()).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidDecomposition);
    assert_eq!(state, before);
}

#[test]
fn pair_win_before_drawing() {
    let mut state = round_with_hands([LOOSE_14, LOOSE_14, SEVEN_PAIRS, LOOSE_14], "B1", "G6", 2, false);
    let win = claim_pair_win(&mut state, 2).unwrap();
    assert_eq!(win.kind, WinKind::Pairs);
    assert_eq!(win.penalty, 4);
    assert_eq!(win.discarded, None);
    assert_eq!(state.scores, [16, 16, 20, 16]);
}

#[test]
fn pair_win_after_drawing_is_rejected() {
    let mut state = round_with_hands([LOOSE_14, LOOSE_14, SEVEN_PAIRS, LOOSE_14], "B1", "G6", 2, false);
    draw_from_deck(&mut state, 2).unwrap();
    assert_eq!(kind_of(claim_pair_win(&mut state, 2).unwrap_err()), ValidationKind::AlreadyDrawn);
}

#[test]
fn exhausting_a_score_ends_the_match() {
    let mut state = round_with_hands([LOOSE_14, GROUPS_PLUS_K5, LOOSE_14, LOOSE_14], "B1", "G6", 1, true);
    state.scores = [9, 9, 1, 2];
    let win = claim_win(&mut state, 1, SearchBudget::default()).unwrap();
    assert!(win.match_over);
    assert_eq!(win.loser, Some(2));
    assert_eq!(state.scores, [7, 9, 0, 0]);
    assert_eq!(state.phase, Phase::MatchOver);
}

#[test]
fn rounds_carry_scores_and_reset_tables() {
    let mut state = GameState::new(20);
    state.phase = Phase::Ready;
    let opener = start_match(&mut state, 13, 5).unwrap();
    assert_eq!(state.round_no, 1);
    assert_eq!(state.scores, [13; 4]);
    assert_eq!(state.turn, Some(opener));
    assert!(state.has_drawn);
    assert_eq!(state.tiles_in_play(), 106);

    assert_eq!(
        kind_of(start_next_round(&mut state, 6).unwrap_err()),
        ValidationKind::PhaseMismatch
    );

    state.phase = Phase::RoundOver;
    state.scores = [13, 11, 11, 11];
    start_next_round(&mut state, 6).unwrap();
    assert_eq!(state.round_no, 2);
    assert_eq!(state.scores, [13, 11, 11, 11]);
    assert!(state.discards.iter().all(Vec::is_empty));
    assert_eq!(state.last_discard, None);
    assert_eq!(state.tiles_in_play(), 106);
}

#[test]
fn start_match_rejects_unknown_starting_points() {
    let mut state = GameState::new(20);
    state.phase = Phase::Ready;
    assert_eq!(
        kind_of(start_match(&mut state, 7, 1).unwrap_err()),
        ValidationKind::InvalidStartingPoints
    );
}
