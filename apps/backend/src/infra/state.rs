use std::sync::Arc;

use crate::config::table::TableConfig;
use crate::error::AppError;
use crate::services::players::{InMemoryDirectory, PlayerDirectory};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and embedding apps)
pub struct StateBuilder {
    config: Option<TableConfig>,
    directory: Option<Arc<dyn PlayerDirectory>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            directory: None,
        }
    }

    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_directory(mut self, directory: Arc<dyn PlayerDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Without an explicit config the environment is read.
    pub fn build(self) -> Result<AppState, AppError> {
        let config = match self.config {
            Some(config) => config,
            None => TableConfig::from_env()?,
        };
        let directory = self
            .directory
            .unwrap_or_else(|| Arc::new(InMemoryDirectory::new()));
        Ok(AppState::new(directory, config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
