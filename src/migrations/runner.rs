//! Migration runner with version tracking in the config document.

use crate::di::FromContext;
use crate::error::AppError;
use crate::migrations::create_register;
use crate::migrations::traits::Register;
use crate::models::SystemConfig;
use crate::repositories::{ConfigRepository, Container};
use crate::store::Store;

/// Result of running migrations.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationResult {
    /// Version recorded before this run.
    pub previous_version: i64,
    /// Version recorded after this run.
    pub current_version: i64,
    /// Ids of the migrations applied by this run, in order.
    pub applied: Vec<String>,
}

/// Applies pending migrations while holding the config lock.
#[derive(FromContext, Clone)]
#[from_context(Context = Container)]
pub struct MigrationClient {
    store: Store,
    config: ConfigRepository,
}

impl MigrationClient {
    pub fn new(store: Store, config: ConfigRepository) -> Self {
        Self { store, config }
    }

    /// Runs every registered migration newer than the recorded version.
    pub async fn migrate(&self) -> Result<MigrationResult, AppError> {
        self.migrate_with(&create_register()).await
    }

    /// Like [`MigrationClient::migrate`] with an explicit register.
    ///
    /// The config lock is released whether or not a migration fails; the
    /// migration error takes precedence over an unlock error.
    pub async fn migrate_with(&self, register: &Register) -> Result<MigrationResult, AppError> {
        let mut config = self.config.lock_and_load().await?;
        let result = self.run_pending(register, &mut config).await;
        let unlocked = self.config.unlock().await;

        let result = result?;
        unlocked?;

        if result.applied.is_empty() {
            tracing::debug!(version = result.current_version, "No pending migrations");
        } else {
            tracing::info!(
                "Migrated from v{} to v{} ({} applied)",
                result.previous_version,
                result.current_version,
                result.applied.len()
            );
        }
        Ok(result)
    }

    /// Version of the last applied migration.
    pub async fn current_version(&self) -> Result<i64, AppError> {
        Ok(self.config.load().await?.migration)
    }

    async fn run_pending(
        &self,
        register: &Register,
        config: &mut SystemConfig,
    ) -> Result<MigrationResult, AppError> {
        let previous_version = config.migration;
        let mut applied = vec![];

        for migration in register.pending(previous_version) {
            tracing::info!(
                "Applying migration {} (v{}): {}",
                migration.id(),
                migration.version(),
                migration.description()
            );

            let txn = self.store.begin().await?;
            match migration.up(&*txn).await {
                Ok(()) => txn.commit().await?,
                Err(e) => {
                    tracing::error!("Migration {} failed: {}", migration.id(), e);
                    if let Err(rollback_err) = txn.rollback().await {
                        tracing::warn!(
                            "Rollback of migration {} failed: {}",
                            migration.id(),
                            rollback_err
                        );
                    }
                    return Err(e);
                }
            }

            config.migration = migration.version();
            self.config.save(config).await?;
            applied.push(migration.id().to_string());
        }

        Ok(MigrationResult {
            previous_version,
            current_version: config.migration,
            applied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LockConfig;
    use crate::migrations::Migration;
    use crate::repositories::Lock;
    use crate::store::backends::memory::MemoryClient;
    use crate::store::testing::BrokenRollbackClient;
    use crate::store::{Document, QueryExt, Transaction};
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::Arc;

    /// Writes a marker document, or fails when `fail` is set.
    struct Marker {
        version: i64,
        fail: bool,
    }

    impl Migration for Marker {
        fn id(&self) -> &'static str {
            if self.fail {
                "failing"
            } else {
                "marker"
            }
        }

        fn version(&self) -> i64 {
            self.version
        }

        fn description(&self) -> &'static str {
            "test migration"
        }

        fn up<'a>(&'a self, txn: &'a dyn Transaction) -> BoxFuture<'a, Result<(), AppError>> {
            async move {
                let doc = Document::try_from(
                    serde_json::json!({"id": format!("v{}", self.version)}),
                )?;
                txn.upsert_document("marker", doc).await?;
                if self.fail {
                    return Err(AppError::Internal("boom".into()));
                }
                Ok(())
            }
            .boxed()
        }
    }

    async fn client() -> (Store, MigrationClient) {
        let store: Store = Arc::new(MemoryClient::new());
        let lock = Lock::new(store.clone(), LockConfig::default()).await.unwrap();
        let config = ConfigRepository::new(store.clone(), lock);
        (store.clone(), MigrationClient::new(store, config))
    }

    #[tokio::test]
    async fn test_applies_pending_once() {
        let (store, client) = client().await;
        let register = Register::new()
            .register(Marker { version: 2, fail: false })
            .register(Marker { version: 1, fail: false });

        let first = client.migrate_with(&register).await.unwrap();
        assert_eq!(first.previous_version, 0);
        assert_eq!(first.current_version, 2);
        assert_eq!(first.applied.len(), 2);
        assert_eq!(store.query("marker").count().await.unwrap(), 2);

        let second = client.migrate_with(&register).await.unwrap();
        assert_eq!(second.previous_version, 2);
        assert!(second.applied.is_empty());
        assert_eq!(client.current_version().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_good_version_and_unlocks() {
        let (store, client) = client().await;
        let register = Register::new()
            .register(Marker { version: 1, fail: false })
            .register(Marker { version: 2, fail: true })
            .register(Marker { version: 3, fail: false });

        let err = client.migrate_with(&register).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(ref m) if m == "boom"));
        assert_eq!(client.current_version().await.unwrap(), 1);
        // The failed migration's write was rolled back
        assert_eq!(store.query("marker").count().await.unwrap(), 1);

        // Lock was released, so a fixed register can run
        let fixed = Register::new().register(Marker { version: 3, fail: false });
        let result = client.migrate_with(&fixed).await.unwrap();
        assert_eq!(result.applied, vec!["marker".to_string()]);
        assert_eq!(result.current_version, 3);
    }

    #[tokio::test]
    async fn test_migration_error_survives_failed_rollback() {
        let store: Store = Arc::new(BrokenRollbackClient::new());
        let lock = Lock::new(store.clone(), LockConfig::default()).await.unwrap();
        let client = MigrationClient::new(store.clone(), ConfigRepository::new(store, lock));
        let register = Register::new().register(Marker { version: 1, fail: true });

        let err = client.migrate_with(&register).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(ref m) if m == "boom"));
        assert_eq!(client.current_version().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_builtin_migrations() {
        let (store, client) = client().await;
        let plugin = Document::try_from(serde_json::json!({"id": "builtin", "scene": ""})).unwrap();
        store.upsert_document("plugin", plugin).await.unwrap();

        let result = client.migrate().await.unwrap();
        assert_eq!(result.current_version, create_register().latest_version());

        let plugin = store.query("plugin").fetch_one().await.unwrap().unwrap();
        assert_eq!(plugin.get_path("scene"), Some(&serde_json::Value::Null));
    }
}
