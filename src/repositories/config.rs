//! Server-wide configuration document.

use crate::error::AppError;
use crate::models::{AuthConfig, SystemConfig};
use crate::repositories::lock::Lock;
use crate::store::{Document, Filter, QueryExt, Store, ID_KEY};

const COLLECTION: &str = "config";
const CONFIG_ID: &str = "config";
/// Name of the lock guarding read-modify-write cycles on the config.
const LOCK_NAME: &str = "config";

/// Repository for the single [`SystemConfig`] document.
#[derive(Clone)]
pub struct ConfigRepository {
    store: Store,
    lock: Lock,
}

impl ConfigRepository {
    pub fn new(store: Store, lock: Lock) -> Self {
        Self { store, lock }
    }

    /// Loads the config, or the default if none has been saved yet.
    pub async fn load(&self) -> Result<SystemConfig, AppError> {
        let doc = self
            .store
            .query(COLLECTION)
            .filter(Filter::id(CONFIG_ID))
            .fetch_one()
            .await?;

        match doc {
            Some(doc) => {
                let mut data = doc.into_inner();
                data.remove(ID_KEY);
                Ok(serde_json::from_value(serde_json::Value::Object(data))?)
            }
            None => Ok(SystemConfig::default()),
        }
    }

    /// Takes the config lock, then loads. The lock is released again if the
    /// load fails.
    pub async fn lock_and_load(&self) -> Result<SystemConfig, AppError> {
        self.lock.lock(LOCK_NAME).await?;
        match self.load().await {
            Ok(config) => Ok(config),
            Err(e) => {
                if let Err(unlock_err) = self.unlock().await {
                    tracing::warn!(error = %unlock_err, "Failed to release config lock");
                }
                Err(e)
            }
        }
    }

    pub async fn save(&self, config: &SystemConfig) -> Result<(), AppError> {
        let mut data = match serde_json::to_value(config)? {
            serde_json::Value::Object(data) => data,
            other => {
                return Err(AppError::Internal(format!(
                    "config serialized to a non-object: {}",
                    other
                )))
            }
        };
        data.insert(ID_KEY.to_string(), CONFIG_ID.into());
        self.store
            .upsert_document(COLLECTION, Document::new(data)?)
            .await
    }

    pub async fn save_and_unlock(&self, config: &SystemConfig) -> Result<(), AppError> {
        self.save(config).await?;
        self.unlock().await
    }

    pub async fn unlock(&self) -> Result<(), AppError> {
        self.lock.unlock(LOCK_NAME).await
    }

    /// Stores auth signing material, keeping the rest of the config.
    pub async fn save_auth(&self, auth: &AuthConfig) -> Result<(), AppError> {
        let mut config = self.load().await?;
        config.auth = Some(auth.clone());
        self.save(&config).await
    }
}
