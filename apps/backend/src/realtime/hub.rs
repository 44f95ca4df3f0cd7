//! Per-table fan-out of state-change notifications.
//!
//! Subscribers receive small events and pull a per-viewer snapshot; hands
//! never travel on the hub.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;
use uuid::Uuid;

use crate::domain::state::Seat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    StateAvailable { table_id: i64, version: u64 },
    YourTurn { table_id: i64, user_id: i64, version: u64 },
    SeatControlChanged { table_id: i64, seat: Seat, automated: bool },
    RoundEnded { table_id: i64, round_no: u32, match_over: bool },
    TableClosed { table_id: i64 },
}

#[derive(Debug, Default)]
pub struct TableEventHub {
    subscribers: DashMap<i64, DashMap<Uuid, UnboundedSender<TableEvent>>>,
}

impl TableEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, table_id: i64) -> (Uuid, UnboundedReceiver<TableEvent>) {
        let (tx, rx) = unbounded_channel();
        let token = Uuid::new_v4();
        self.subscribers
            .entry(table_id)
            .or_default()
            .insert(token, tx);
        (token, rx)
    }

    pub fn unsubscribe(&self, table_id: i64, token: Uuid) {
        let now_empty = match self.subscribers.get(&table_id) {
            Some(entry) => {
                entry.remove(&token);
                entry.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.subscribers.remove_if(&table_id, |_, subs| subs.is_empty());
        }
    }

    /// Deliver to every live subscriber; closed receivers are dropped.
    pub fn publish(&self, table_id: i64, event: TableEvent) {
        let Some(entry) = self.subscribers.get(&table_id) else {
            return;
        };
        entry.retain(|_, tx| tx.send(event.clone()).is_ok());
        debug!(table_id, ?event, receivers = entry.len(), "published table event");
    }

    /// Announce closure and forget every subscriber of the table.
    pub fn close(&self, table_id: i64) {
        self.publish(table_id, TableEvent::TableClosed { table_id });
        self.subscribers.remove(&table_id);
    }

    pub fn subscriber_count(&self, table_id: i64) -> usize {
        self.subscribers.get(&table_id).map_or(0, |e| e.len())
    }
}
