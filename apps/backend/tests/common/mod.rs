#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use okey_backend::domain::state::Seat;
use okey_backend::domain::Tile;
use okey_backend::errors::ErrorCode;
use okey_backend::services::tables::Table;
use okey_backend::{build_state, AppError, AppState, InMemoryDirectory, TableConfig, TableEvent, TableFlowService};
use tokio::sync::mpsc::UnboundedReceiver;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    okey_test_support::logging::init();
}

pub const TABLE: i64 = 7;

/// Registered players, seated in this order by `seat_all`.
pub const PLAYERS: [(i64, &str); 4] = [(101, "Ayla"), (102, "Baran"), (103, "Cem"), (104, "Deniz")];

/// Registered but never seated by the helpers.
pub const LATECOMER: (i64, &str) = (105, "Ece");

pub fn test_state() -> AppState {
    let directory = InMemoryDirectory::with_players(PLAYERS.into_iter().chain([LATECOMER]));
    build_state()
        .with_config(TableConfig::for_tests())
        .with_directory(Arc::new(directory))
        .build()
        .expect("test state builds")
}

pub fn user_at(seat: Seat) -> i64 {
    PLAYERS[seat as usize].0
}

pub async fn seat_all(flow: &TableFlowService) {
    for (seat, (user_id, _)) in PLAYERS.iter().enumerate() {
        assert_eq!(flow.join(TABLE, *user_id).await.unwrap(), seat as Seat);
    }
}

pub async fn ready_all(flow: &TableFlowService) {
    for (user_id, _) in PLAYERS {
        flow.set_ready(TABLE, user_id, true).await.unwrap();
    }
}

/// Four seated, ready players and a dealt first round. Returns the opener.
pub async fn started(flow: &TableFlowService) -> Seat {
    seat_all(flow).await;
    ready_all(flow).await;
    flow.start(TABLE).await.unwrap()
}

/// Edit the live table directly; for arranging hands in tests.
pub async fn with_table<T>(state: &AppState, edit: impl FnOnce(&mut Table) -> T) -> T {
    let handle = state.tables.get(TABLE).expect("table exists");
    let mut table = handle.lock().await;
    edit(&mut table)
}

pub async fn own_hand(flow: &TableFlowService, user_id: i64) -> Vec<Tile> {
    flow.snapshot(TABLE, Some(user_id))
        .await
        .unwrap()
        .viewer
        .expect("seated viewer sees a hand")
        .hand
}

pub fn assert_code(err: AppError, expected: ErrorCode) {
    assert_eq!(err.code(), expected, "unexpected error: {err}");
}

pub fn drain(rx: &mut UnboundedReceiver<TableEvent>) -> Vec<TableEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Seat only the player registered for `seat`.
pub async fn join_only(flow: &TableFlowService, seat: Seat) {
    assert_eq!(flow.join(TABLE, user_at(seat)).await.unwrap(), 0);
}
