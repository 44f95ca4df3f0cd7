use tracing::info;

use super::mutation::closed;
use super::TableFlowService;
use crate::domain::round::{start_match, start_next_round};
use crate::domain::rules::{valid_starting_points, PLAYERS};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{require_phase, Phase, Seat};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::services::players::PlayerProfile;
use crate::services::seat_control::{Presence, SeatOccupant};
use crate::services::tables::Table;

fn require_lobby(table: &Table, action: &str) -> Result<(), DomainError> {
    if table.game.phase.is_lobby() {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("cannot {action} while {:?}", table.game.phase),
        ))
    }
}

fn require_full_table(table: &Table) -> Result<(), DomainError> {
    let occupied = table.occupied();
    if occupied < PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("{occupied} of {PLAYERS} seats taken"),
        ));
    }
    Ok(())
}

fn seat_player(table: &mut Table, profile: &PlayerProfile) -> Result<Seat, DomainError> {
    if let Some(seat) = table.seat_of(profile.user_id) {
        return Err(DomainError::conflict(
            ConflictKind::AlreadySeated,
            format!("user {} already holds seat {seat}", profile.user_id),
        ));
    }
    require_lobby(table, "join")?;
    let seat = table
        .seats
        .iter()
        .position(Option::is_none)
        .ok_or_else(|| DomainError::conflict(ConflictKind::TableFull, format!("table {} is full", table.id)))?;

    table.seats[seat] = Some(SeatOccupant::human(profile.user_id, profile.display_name.clone()));
    table.refresh_lobby_phase();
    info!(table_id = table.id, seat, user_id = profile.user_id, "player joined");
    Ok(seat as Seat)
}

impl TableFlowService {
    /// Seat `user_id` at the first free seat, creating the table on first use.
    pub async fn join(&self, table_id: i64, user_id: i64) -> Result<Seat, AppError> {
        let profile = self.directory.profile(user_id).await?;
        loop {
            let handle = self.repo.get_or_create(table_id, self.config.starting_points);
            let mut table = handle.lock().await;
            // Closed between lookup and lock; the next lookup creates a fresh table.
            if table.closed {
                continue;
            }
            return self.mutate_locked(&mut table, |table| Ok(seat_player(table, &profile)?));
        }
    }

    /// Leave the table.
    ///
    /// Mid-match a bot plays the seat out; otherwise the seat is freed. The
    /// table is removed once no human member remains.
    pub async fn leave(&self, table_id: i64, user_id: i64) -> Result<(), AppError> {
        let handle = self.table_handle(table_id)?;
        let mut table = handle.lock().await;
        if table.closed {
            return Err(closed(table_id));
        }

        self.mutate_locked(&mut table, |table| {
            let seat = table.require_seat(user_id)?;
            if table.match_in_progress() {
                let policy = self.substitute_for(table, seat)?;
                if let Some(occupant) = table.occupant_mut(seat) {
                    occupant.connected = false;
                    occupant.hand_to_bot(policy, Presence::Departed);
                }
                info!(table_id, seat, user_id, "player left mid-match, bot takes the seat");
            } else {
                table.seats[seat as usize] = None;
                table.refresh_lobby_phase();
                info!(table_id, seat, user_id, "player left");
            }
            Ok(())
        })?;

        self.close_if_abandoned(&mut table);
        Ok(())
    }

    pub async fn set_ready(&self, table_id: i64, user_id: i64, ready: bool) -> Result<(), AppError> {
        self.run_mutation(table_id, |table| {
            let seat = table.require_seat(user_id)?;
            require_lobby(table, "change readiness")?;
            if let Some(occupant) = table.occupant_mut(seat) {
                occupant.is_ready = ready;
            }
            table.refresh_lobby_phase();
            Ok(())
        })
        .await
    }

    /// Choose the starting points (5, 13 or 20) for the next match.
    pub async fn update_settings(&self, table_id: i64, user_id: i64, starting_points: i16) -> Result<(), AppError> {
        self.run_mutation(table_id, |table| {
            table.require_seat(user_id)?;
            require_lobby(table, "change settings")?;
            if !valid_starting_points(starting_points) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidStartingPoints,
                    format!("starting points must be 5, 13 or 20, got {starting_points}"),
                )
                .into());
            }
            table.game.starting_points = starting_points;
            info!(table_id, starting_points, "table settings updated");
            Ok(())
        })
        .await
    }

    /// Begin a match with four ready players. Returns the opening seat.
    pub async fn start(&self, table_id: i64) -> Result<Seat, AppError> {
        let fixed_seed = self.config.rng_seed;
        self.run_mutation(table_id, |table| {
            require_lobby(table, "start a match")?;
            require_full_table(table)?;
            if !table.all_ready() {
                return Err(DomainError::validation(ValidationKind::NotAllReady, "not every player is ready").into());
            }

            let match_seed = fixed_seed.unwrap_or_else(rand::random);
            let points = table.game.starting_points;
            let opener = start_match(&mut table.game, points, derive_dealing_seed(match_seed, 1))?;
            table.match_seed = match_seed;
            info!(table_id, starting_points = points, opener, "match started");
            Ok(opener)
        })
        .await
    }

    /// Deal the next round after a finished one. Returns the opening seat.
    pub async fn start_next_round(&self, table_id: i64) -> Result<Seat, AppError> {
        self.run_mutation(table_id, |table| {
            require_phase(&table.game, Phase::RoundOver)?;
            require_full_table(table)?;
            let seed = derive_dealing_seed(table.match_seed, table.game.round_no + 1);
            Ok(start_next_round(&mut table.game, seed)?)
        })
        .await
    }
}
