use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use presenty_shared::Cooldown;

use crate::error::StoreError;

/// Device-local persistence of the scan block timestamp.
#[async_trait]
pub trait CooldownStore: Send + Sync {
    async fn get(&self) -> Result<Option<DateTime<Utc>>, StoreError>;

    async fn set(&self, blocked_until: DateTime<Utc>) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

/// Read the stored cooldown, dropping it from the store once it has run out.
pub async fn load_cooldown(
    store: &dyn CooldownStore,
    now: DateTime<Utc>,
) -> Result<Cooldown, StoreError> {
    let cooldown = Cooldown {
        blocked_until: store.get().await?,
    };

    if cooldown.is_expired(now) {
        debug!("Scan cooldown expired, clearing");
        store.clear().await?;
        return Ok(Cooldown::none());
    }

    Ok(cooldown)
}

/// Persist `cooldown`, clearing the store when it carries no block.
pub async fn save_cooldown(
    store: &dyn CooldownStore,
    cooldown: &Cooldown,
) -> Result<(), StoreError> {
    match cooldown.blocked_until {
        Some(until) => store.set(until).await,
        None => store.clear().await,
    }
}

/// Process-lifetime store, used when the host has no persistence of its own.
#[derive(Clone, Default)]
pub struct MemoryCooldownStore {
    blocked_until: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CooldownStore for MemoryCooldownStore {
    async fn get(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(*self.blocked_until.lock().await)
    }

    async fn set(&self, blocked_until: DateTime<Utc>) -> Result<(), StoreError> {
        *self.blocked_until.lock().await = Some(blocked_until);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.blocked_until.lock().await = None;
        Ok(())
    }
}
