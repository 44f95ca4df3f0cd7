use std::sync::Arc;

use crate::config::table::TableConfig;
use crate::realtime::TableEventHub;
use crate::services::players::PlayerDirectory;
use crate::services::table_flow::TableFlowService;
use crate::services::tables::TableRepository;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<TableRepository>,
    pub hub: Arc<TableEventHub>,
    pub directory: Arc<dyn PlayerDirectory>,
    pub config: Arc<TableConfig>,
}

impl AppState {
    pub fn new(directory: Arc<dyn PlayerDirectory>, config: TableConfig) -> Self {
        Self {
            tables: Arc::new(TableRepository::new()),
            hub: Arc::new(TableEventHub::new()),
            directory,
            config: Arc::new(config),
        }
    }

    /// Table flow service sharing this state's repository and hub.
    pub fn table_flow(&self) -> TableFlowService {
        TableFlowService::new(self)
    }
}
