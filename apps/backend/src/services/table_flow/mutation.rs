use tracing::{debug, info};

use super::TableFlowService;
use crate::domain::state::{Phase, Seat};
use crate::domain::table_transition::{derive_table_transitions, TableTransition};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::realtime::TableEvent;
use crate::services::seat_control::Presence;
use crate::services::tables::{Table, TableHandle};

impl TableFlowService {
    pub(super) fn table_handle(&self, table_id: i64) -> Result<TableHandle, AppError> {
        Ok(self.repo.get(table_id)?)
    }

    /// Lock the table and apply `mutation` with full post-processing.
    pub(super) async fn run_mutation<T, F>(&self, table_id: i64, mutation: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Table) -> Result<T, AppError>,
    {
        let handle = self.table_handle(table_id)?;
        let mut table = handle.lock().await;
        if table.closed {
            return Err(closed(table_id));
        }
        self.mutate_locked(&mut table, mutation)
    }

    /// Apply `mutation` to an already locked table.
    ///
    /// A failed mutation leaves the table untouched and publishes nothing.
    pub(super) fn mutate_locked<T, F>(&self, table: &mut Table, mutation: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Table) -> Result<T, AppError>,
    {
        let before = table.lifecycle_view();
        let value = mutation(table)?;
        table.version += 1;

        let mut transitions = derive_table_transitions(&before, &table.lifecycle_view());
        debug!(table_id = table.id, version = table.version, ?transitions, "table mutated");

        if transitions.contains(&TableTransition::MatchEnded) {
            for seat in settle_match_end(table) {
                transitions.push(TableTransition::SeatControlChanged { seat, automated: false });
            }
        }
        self.schedule_bot_move(table);
        self.publish_transitions(table, &transitions);
        Ok(value)
    }

    fn publish_transitions(&self, table: &Table, transitions: &[TableTransition]) {
        let table_id = table.id;
        let version = table.version;
        self.hub.publish(table_id, TableEvent::StateAvailable { table_id, version });

        for transition in transitions {
            match *transition {
                TableTransition::TurnBecame { seat } => {
                    if let Some(occupant) = table.occupant(seat).filter(|o| !o.is_automated()) {
                        self.hub.publish(
                            table_id,
                            TableEvent::YourTurn {
                                table_id,
                                user_id: occupant.user_id,
                                version,
                            },
                        );
                    }
                }
                TableTransition::SeatControlChanged { seat, automated } => {
                    self.hub.publish(table_id, TableEvent::SeatControlChanged { table_id, seat, automated });
                }
                TableTransition::RoundEnded => {
                    self.hub.publish(
                        table_id,
                        TableEvent::RoundEnded {
                            table_id,
                            round_no: table.game.round_no,
                            match_over: table.game.phase == Phase::MatchOver,
                        },
                    );
                }
                TableTransition::RoundStarted | TableTransition::MatchEnded => {}
            }
        }
    }

    /// Drop the table once no human member remains.
    pub(super) fn close_if_abandoned(&self, table: &mut Table) {
        if table.has_human_member() {
            return;
        }
        table.closed = true;
        table.bot_move = None;
        table.seats = Default::default();
        self.repo.remove(table.id);
        self.hub.close(table.id);
    }
}

/// Reset seats for the next match: bots covering departed players leave,
/// substituted seats go back to their (still disconnected) owners, and
/// everyone has to ready up again. Returns the seats handed back.
fn settle_match_end(table: &mut Table) -> Vec<Seat> {
    let table_id = table.id;
    let mut restored = Vec::new();
    for (seat, slot) in table.seats.iter_mut().enumerate() {
        if slot.as_ref().is_some_and(|o| o.presence == Presence::Departed) {
            info!(table_id, seat, "departed seat vacated at match end");
            *slot = None;
            continue;
        }
        let Some(occupant) = slot.as_mut() else {
            continue;
        };
        if occupant.presence == Presence::Substituted {
            occupant.restore_human(None);
            occupant.connected = false;
            info!(table_id, seat, user_id = occupant.user_id, "substitute bot released at match end");
            restored.push(seat as Seat);
        }
        occupant.is_ready = false;
    }
    restored
}

pub(super) fn closed(table_id: i64) -> AppError {
    DomainError::not_found(NotFoundKind::Table, format!("Table {table_id} not found")).into()
}
