use tracing::{debug, warn};
use uuid::Uuid;

use super::player_actions::apply_seat_action;
use super::TableFlowService;
use crate::ai::{fallback_bot, BotPolicy};
use crate::domain::player_view::SeatView;
use crate::domain::state::Seat;
use crate::error::AppError;
use crate::services::scheduler::ScheduledTask;
use crate::services::seat_control::{MoveRequest, SeatController};
use crate::services::tables::{PendingBotMove, Table};

impl TableFlowService {
    /// Make the pending bot move match the current state.
    ///
    /// Keeps an already scheduled move for the same decision point, replaces
    /// one for an outdated point and cancels it when no bot is to act.
    pub(super) fn schedule_bot_move(&self, table: &mut Table) {
        let Some(step) = table.pending_bot_step() else {
            if table.bot_move.take().is_some() {
                debug!(table_id = table.id, "pending bot move cancelled");
            }
            return;
        };
        if table.bot_move.as_ref().is_some_and(|p| p.step == step) {
            return;
        }

        let service = self.clone();
        let table_id = table.id;
        let task = ScheduledTask::spawn(self.config.bot_think_delay, move |task_id| async move {
            service.run_bot_move(table_id, task_id).await;
        });
        debug!(table_id, seat = step.seat, has_drawn = step.has_drawn, "bot move scheduled");
        table.bot_move = Some(PendingBotMove { step, task });
    }

    async fn run_bot_move(&self, table_id: i64, task_id: Uuid) {
        let Ok(handle) = self.repo.get(table_id) else {
            debug!(table_id, "bot move for a removed table ignored");
            return;
        };
        let mut table = handle.lock().await;

        let current = table.bot_move.as_ref().map(|p| (p.task.id(), p.step));
        let Some((id, step)) = current.filter(|_| !table.closed) else {
            debug!(table_id, %task_id, "stale bot move ignored");
            return;
        };
        if id != task_id || table.pending_bot_step() != Some(step) {
            debug!(table_id, %task_id, "stale bot move ignored");
            return;
        }
        table.bot_move = None;

        if let Err(err) = self.play_bot_step(&mut table, step.seat) {
            warn!(table_id, seat = step.seat, error = %err, "bot could not move");
        }
    }

    fn play_bot_step(&self, table: &mut Table, seat: Seat) -> Result<(), AppError> {
        let table_id = table.id;
        let budget = self.config.search_budget;
        let view = SeatView::for_turn(&table.game, seat, budget)?;
        let occupant = table
            .occupant(seat)
            .ok_or_else(|| AppError::internal(format!("bot seat {seat} is empty")))?;

        let action = match occupant.controller.request_move(&view) {
            Ok(MoveRequest::Decided(action)) => action,
            Ok(MoveRequest::AwaitHuman) => return Ok(()),
            Err(err) => {
                warn!(table_id, seat, error = %err, "bot policy failed, using fallback");
                fallback_bot().choose_action(&view)?
            }
        };
        debug!(table_id, seat, ?action, "bot decided");

        let applied = self.mutate_locked(table, |t| Ok(apply_seat_action(t, seat, action, budget)?));
        if let Err(err) = applied {
            warn!(table_id, seat, ?action, error = %err, "bot action rejected, using fallback");
            let fallback = fallback_bot().choose_action(&view)?;
            self.mutate_locked(table, |t| Ok(apply_seat_action(t, seat, fallback, budget)?))?;
        }
        Ok(())
    }
}
