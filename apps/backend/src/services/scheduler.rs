//! Cancellable delayed work on the tokio runtime.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// A delayed task that never runs once its handle is cancelled or dropped.
///
/// The id is handed to the task body so it can confirm, under the table lock,
/// that it is still the table's current task before acting.
#[derive(Debug)]
pub struct ScheduledTask {
    id: Uuid,
    token: CancellationToken,
}

impl ScheduledTask {
    pub fn spawn<F, Fut>(delay: Duration, body: F) -> Self
    where
        F: FnOnce(Uuid) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => body(id).await,
            }
        });
        Self { id, token }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
