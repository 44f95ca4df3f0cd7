//! Player identity lookup. The engine needs display names only.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub user_id: i64,
    pub display_name: String,
}

/// Source of player identities, owned by the surrounding application.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    async fn profile(&self, user_id: i64) -> Result<PlayerProfile, DomainError>;
}

/// Directory backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    names: DashMap<i64, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, user_id: i64, display_name: impl Into<String>) {
        self.names.insert(user_id, display_name.into());
    }

    pub fn with_players<'a>(players: impl IntoIterator<Item = (i64, &'a str)>) -> Self {
        let dir = Self::new();
        for (id, name) in players {
            dir.register(id, name);
        }
        dir
    }
}

#[async_trait]
impl PlayerDirectory for InMemoryDirectory {
    async fn profile(&self, user_id: i64) -> Result<PlayerProfile, DomainError> {
        let display_name = self
            .names
            .get(&user_id)
            .map(|name| name.clone())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("User {user_id} not found")))?;
        Ok(PlayerProfile {
            user_id,
            display_name,
        })
    }
}
