//! Table flow service - serializes every action on a table and drives bots.
//!
//! Each public method locks one table, applies a domain operation, bumps the
//! version, publishes events and (re)schedules any bot move the new state
//! calls for. Tables never share state, so different tables run in parallel.

mod bot_coordinator;
mod mutation;
mod player_actions;
mod presence;
mod seats;
mod views;

use std::sync::Arc;

use crate::config::table::TableConfig;
use crate::realtime::TableEventHub;
use crate::services::players::PlayerDirectory;
use crate::services::tables::TableRepository;
use crate::state::app_state::AppState;

#[derive(Clone)]
pub struct TableFlowService {
    repo: Arc<TableRepository>,
    hub: Arc<TableEventHub>,
    directory: Arc<dyn PlayerDirectory>,
    config: Arc<TableConfig>,
}

impl TableFlowService {
    pub fn new(state: &AppState) -> Self {
        Self {
            repo: Arc::clone(&state.tables),
            hub: Arc::clone(&state.hub),
            directory: Arc::clone(&state.directory),
            config: Arc::clone(&state.config),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
}
