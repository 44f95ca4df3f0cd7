//! In-memory table registry. Each table is its own single-writer unit.

use std::sync::Arc;

use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::rules::PLAYERS;
use crate::domain::snapshot::SeatOccupancy;
use crate::domain::state::{lobby_phase, GameState, Phase, Seat};
use crate::domain::table_transition::TableLifecycleView;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::services::scheduler::ScheduledTask;
use crate::services::seat_control::SeatOccupant;

/// Identifies one bot decision point; a pending move is kept while it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotStep {
    pub round_no: u32,
    pub seat: Seat,
    pub turns_taken: u32,
    pub has_drawn: bool,
}

#[derive(Debug)]
pub struct PendingBotMove {
    pub step: BotStep,
    pub task: ScheduledTask,
}

#[derive(Debug)]
pub struct Table {
    pub id: i64,
    pub seats: [Option<SeatOccupant>; PLAYERS],
    pub game: GameState,
    pub version: u64,
    pub created_at: OffsetDateTime,
    pub match_seed: u64,
    pub bot_move: Option<PendingBotMove>,
    /// Removed from the repository; late lockers must look the table up again.
    pub closed: bool,
}

impl Table {
    pub fn new(id: i64, starting_points: i16) -> Self {
        Self {
            id,
            seats: Default::default(),
            game: GameState::new(starting_points),
            version: 0,
            created_at: OffsetDateTime::now_utc(),
            match_seed: 0,
            bot_move: None,
            closed: false,
        }
    }

    /// Seat of a human member; departed players no longer count.
    pub fn seat_of(&self, user_id: i64) -> Option<Seat> {
        self.seats
            .iter()
            .position(|s| s.as_ref().is_some_and(|o| o.user_id == user_id && o.is_human_member()))
            .map(|i| i as Seat)
    }

    pub fn require_seat(&self, user_id: i64) -> Result<Seat, DomainError> {
        self.seat_of(user_id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NotSeated,
                format!("user {user_id} is not seated at table {}", self.id),
            )
        })
    }

    pub fn occupant(&self, seat: Seat) -> Option<&SeatOccupant> {
        self.seats.get(seat as usize).and_then(Option::as_ref)
    }

    pub fn occupant_mut(&mut self, seat: Seat) -> Option<&mut SeatOccupant> {
        self.seats.get_mut(seat as usize).and_then(Option::as_mut)
    }

    pub fn occupied(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    pub fn all_ready(&self) -> bool {
        self.occupied() == PLAYERS && self.seats.iter().flatten().all(|o| o.is_ready)
    }

    pub fn has_human_member(&self) -> bool {
        self.seats.iter().flatten().any(SeatOccupant::is_human_member)
    }

    /// A match is running: rounds are being played or between rounds.
    pub fn match_in_progress(&self) -> bool {
        matches!(self.game.phase, Phase::Dealt | Phase::RoundOver)
    }

    /// Recompute the phase from seating while no match is running.
    pub fn refresh_lobby_phase(&mut self) {
        if matches!(self.game.phase, Phase::Empty | Phase::Seating | Phase::Ready) {
            self.game.phase = lobby_phase(self.occupied(), self.all_ready());
        }
    }

    pub fn lifecycle_view(&self) -> TableLifecycleView {
        TableLifecycleView {
            version: self.version,
            phase: self.game.phase,
            turn: self.game.turn,
            automated: std::array::from_fn(|i| self.seats[i].as_ref().is_some_and(SeatOccupant::is_automated)),
        }
    }

    pub fn occupancy(&self) -> [Option<SeatOccupancy>; PLAYERS] {
        std::array::from_fn(|i| {
            self.seats[i].as_ref().map(|o| SeatOccupancy {
                user_id: o.user_id,
                display_name: o.shown_name(),
                is_bot: o.is_automated(),
                is_ready: o.is_ready,
                connected: o.connected,
            })
        })
    }

    /// The seat a bot should act for right now, if any.
    pub fn pending_bot_step(&self) -> Option<BotStep> {
        if self.game.phase != Phase::Dealt {
            return None;
        }
        let seat = self.game.turn?;
        self.occupant(seat).filter(|o| o.is_automated()).map(|_| BotStep {
            round_no: self.game.round_no,
            seat,
            turns_taken: self.game.turns_taken,
            has_drawn: self.game.has_drawn,
        })
    }
}

pub type TableHandle = Arc<Mutex<Table>>;

/// All live tables, keyed by id.
#[derive(Debug, Default)]
pub struct TableRepository {
    tables: DashMap<i64, TableHandle>,
}

impl TableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table_id: i64) -> Result<TableHandle, DomainError> {
        self.tables
            .get(&table_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Table, format!("Table {table_id} not found")))
    }

    pub fn get_or_create(&self, table_id: i64, starting_points: i16) -> TableHandle {
        let entry = self.tables.entry(table_id).or_insert_with(|| {
            info!(table_id, starting_points, "table created");
            Arc::new(Mutex::new(Table::new(table_id, starting_points)))
        });
        Arc::clone(entry.value())
    }

    pub fn remove(&self, table_id: i64) -> bool {
        let removed = self.tables.remove(&table_id).is_some();
        if removed {
            info!(table_id, "table removed");
        }
        removed
    }

    pub fn contains(&self, table_id: i64) -> bool {
        self.tables.contains_key(&table_id)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
