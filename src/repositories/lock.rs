//! Named locks shared by every process using the same store.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::config::{ConfigError, LockConfig};
use crate::error::AppError;
use crate::store::{Document, Filter, IndexSpec, QueryExt, Store};

const COLLECTION: &str = "locks";

#[derive(Debug, Serialize, Deserialize)]
struct LockRecord {
    id: String,
    owner: String,
    expires_at: DateTime<Utc>,
}

/// A lock client with its own owner id.
///
/// A lock is a document in `locks` keyed by name; whoever inserts it first
/// holds it until `unlock` or until it expires.
#[derive(Clone)]
pub struct Lock {
    store: Store,
    owner: String,
    ttl: chrono::Duration,
    config: LockConfig,
}

impl Lock {
    /// Prepares the `locks` collection and returns a client with a fresh owner.
    pub async fn new(store: Store, config: LockConfig) -> Result<Self, AppError> {
        let ttl = config.ttl()?;
        store
            .ensure_index(COLLECTION, &IndexSpec::new("owner"))
            .await?;

        Ok(Self {
            store,
            owner: Ulid::new().to_string(),
            ttl,
            config,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Acquires `name`, waiting up to the configured maximum.
    ///
    /// An expired lock held by another owner is taken over.
    pub async fn lock(&self, name: &str) -> Result<(), AppError> {
        let started = Instant::now();

        loop {
            let expires_at = Utc::now().checked_add_signed(self.ttl).ok_or_else(|| {
                ConfigError::invalid(format!(
                    "lock.ttl_secs puts the expiry of '{}' out of range",
                    name
                ))
            })?;
            let record = LockRecord {
                id: name.to_string(),
                owner: self.owner.clone(),
                expires_at,
            };
            match self
                .store
                .insert_document(COLLECTION, Document::from_entity(&record)?)
                .await
            {
                Ok(()) => {
                    tracing::debug!(lock = name, owner = %self.owner, "Lock acquired");
                    return Ok(());
                }
                Err(AppError::Duplicate { .. }) => {}
                Err(e) => return Err(e),
            }

            if self.reclaim_expired(name).await? {
                continue;
            }

            if started.elapsed() >= self.config.max_wait() {
                return Err(AppError::Locked(name.to_string()));
            }
            tokio::time::sleep(self.config.retry_interval()).await;
        }
    }

    /// Deletes `name` if it has expired. Returns whether anything was removed.
    async fn reclaim_expired(&self, name: &str) -> Result<bool, AppError> {
        let held: Option<LockRecord> = self
            .store
            .query(COLLECTION)
            .filter(Filter::id(name))
            .fetch_entity()
            .await?;

        let Some(held) = held else {
            // Released between our insert and this read
            return Ok(true);
        };
        if held.expires_at > Utc::now() {
            return Ok(false);
        }

        // Match on the observed owner and expiry so a fresh holder is kept
        let filter = Filter::id(name)
            .and(Filter::eq("owner", held.owner.as_str()))
            .and(Filter::eq("expires_at", serde_json::to_value(held.expires_at)?));
        let removed = self.store.delete_documents(COLLECTION, &filter).await?;
        if removed > 0 {
            tracing::warn!(lock = name, previous_owner = %held.owner, "Reclaimed expired lock");
        }
        Ok(true)
    }

    /// Releases `name`. Fails with `NotLocked` if this owner does not hold it.
    pub async fn unlock(&self, name: &str) -> Result<(), AppError> {
        let filter = Filter::id(name).and(Filter::eq("owner", self.owner.as_str()));
        match self.store.delete_documents(COLLECTION, &filter).await? {
            0 => Err(AppError::NotLocked(name.to_string())),
            _ => {
                tracing::debug!(lock = name, owner = %self.owner, "Lock released");
                Ok(())
            }
        }
    }
}
