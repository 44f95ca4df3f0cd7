use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::TableFlowService;
use crate::ai::{create_bot, BotPolicy};
use crate::domain::seed_derivation::derive_bot_seed;
use crate::domain::state::Seat;
use crate::error::AppError;
use crate::services::scheduler::ScheduledTask;
use crate::services::seat_control::Presence;
use crate::services::tables::Table;

impl TableFlowService {
    /// The substitute policy for `seat`, seeded from the match.
    pub(super) fn substitute_for(&self, table: &Table, seat: Seat) -> Result<Arc<dyn BotPolicy>, AppError> {
        let seed = derive_bot_seed(table.match_seed, seat);
        create_bot(&self.config.substitute_bot, Some(seed)).map(Arc::from)
    }

    /// Transport for `user_id` dropped.
    ///
    /// Mid-match this starts the reconnect grace timer; otherwise the seat is
    /// only marked as not connected.
    pub async fn player_disconnected(&self, table_id: i64, user_id: i64) -> Result<(), AppError> {
        let grace = self.config.reconnect_grace;
        let service = self.clone();
        self.run_mutation(table_id, move |table| {
            let seat = table.require_seat(user_id)?;
            let in_match = table.match_in_progress();
            let occupant = table
                .occupant_mut(seat)
                .ok_or_else(|| AppError::internal(format!("seat {seat} vanished")))?;
            occupant.connected = false;

            if in_match && occupant.presence == Presence::Connected {
                occupant.presence = Presence::GracePeriod;
                occupant.grace_timer = Some(ScheduledTask::spawn(grace, move |task_id| async move {
                    service.expire_grace(table_id, seat, task_id).await;
                }));
                info!(table_id, seat, user_id, grace_ms = grace.as_millis() as u64, "grace period started");
            } else {
                debug!(table_id, seat, user_id, "player disconnected");
            }
            Ok(())
        })
        .await
    }

    /// Transport for `user_id` is back; any substitute hands the seat back.
    pub async fn player_reconnected(&self, table_id: i64, user_id: i64, connection: Uuid) -> Result<(), AppError> {
        self.run_mutation(table_id, |table| {
            let seat = table.require_seat(user_id)?;
            let occupant = table
                .occupant_mut(seat)
                .ok_or_else(|| AppError::internal(format!("seat {seat} vanished")))?;
            let previous = occupant.presence;
            occupant.restore_human(Some(connection));

            match previous {
                Presence::Substituted => info!(table_id, seat, user_id, "seat restored to player"),
                Presence::GracePeriod => info!(table_id, seat, user_id, "reconnected within grace period"),
                _ => debug!(table_id, seat, user_id, "player reconnected"),
            }
            Ok(())
        })
        .await
    }

    async fn expire_grace(&self, table_id: i64, seat: Seat, task_id: Uuid) {
        let Ok(handle) = self.repo.get(table_id) else {
            return;
        };
        let mut table = handle.lock().await;
        let current = table
            .occupant(seat)
            .and_then(|o| o.grace_timer.as_ref())
            .map(|t| t.id());
        if table.closed || current != Some(task_id) {
            debug!(table_id, seat, %task_id, "stale grace timer ignored");
            return;
        }

        let result = self.mutate_locked(&mut table, |table| {
            if !table.match_in_progress() {
                if let Some(occupant) = table.occupant_mut(seat) {
                    occupant.grace_timer = None;
                    occupant.presence = Presence::Connected;
                }
                return Ok(());
            }
            let policy = self.substitute_for(table, seat)?;
            let occupant = table
                .occupant_mut(seat)
                .ok_or_else(|| AppError::internal(format!("seat {seat} vanished")))?;
            occupant.hand_to_bot(policy, Presence::Substituted);
            info!(table_id, seat, user_id = occupant.user_id, "seat substituted by bot");
            Ok(())
        });
        if let Err(err) = result {
            warn!(table_id, seat, error = %err, "grace expiry failed");
        }
    }
}
