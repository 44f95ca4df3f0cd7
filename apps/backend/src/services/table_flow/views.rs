use super::mutation::closed;
use super::TableFlowService;
use crate::domain::snapshot::{snapshot, TableSnapshot};
use crate::error::AppError;

impl TableFlowService {
    /// Table state as `viewer` may see it; spectators get no hand.
    pub async fn snapshot(&self, table_id: i64, viewer: Option<i64>) -> Result<TableSnapshot, AppError> {
        let handle = self.table_handle(table_id)?;
        let table = handle.lock().await;
        if table.closed {
            return Err(closed(table_id));
        }
        let seat = viewer.and_then(|user_id| table.seat_of(user_id));
        Ok(snapshot(&table.game, table.id, table.version, &table.occupancy(), seat))
    }
}
