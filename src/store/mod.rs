//! Document store abstraction layer.
//!
//! Repositories talk to a schemaless document store through object-safe
//! traits, so the same code runs against PostgreSQL (JSONB) in production and
//! an in-memory store in tests.
//!
//! # Architecture
//!
//! - [`DocumentExecutor`] - Find, count, insert, upsert, update, delete, index
//! - [`Transaction`] - Transaction lifecycle (commit/rollback)
//! - [`DocumentClient`] - Connection management and transaction creation
//!
//! A [`Filter`] describes which documents an operation touches and
//! [`Query`] is a fluent builder for finds.
//!
//! # Usage
//!
//! ```ignore
//! use geoscene::store::{self, Filter, QueryExt, SortOrder};
//!
//! let store = store::connect(&config.store).await?;
//!
//! let layers = store.query("layer")
//!     .filter(Filter::eq("scene", scene_id))
//!     .sort("name", SortOrder::Ascending)
//!     .fetch_entities::<Layer>()
//!     .await?;
//! ```

mod document;
mod filter;
mod query;
mod traits;

pub mod backends;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

pub use document::{lookup_path, Document, DocumentStream, JsonMap, ID_KEY};
pub use filter::{
    apply_optional_scene_filter, apply_scene_filter, apply_workspace_filter, Filter,
    SCENE_FIELD, WORKSPACE_FIELD,
};
pub use query::{Query, QueryExt};
pub use traits::{DocumentClient, DocumentExecutor, FindOptions, IndexSpec, SortOrder, Transaction};

use crate::config::{Backend, StoreConfig};
use crate::error::AppError;

/// Shared handle to the document store, cloned into every repository.
pub type Store = Arc<dyn DocumentClient>;

/// Opens the configured backend.
///
/// For PostgreSQL the `documents` table is created if missing.
pub async fn connect(config: &StoreConfig) -> Result<Store, AppError> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(backends::memory::MemoryClient::new())),
        Backend::Postgres => {
            let uri = config.uri.as_deref().ok_or_else(|| {
                AppError::Store("store.uri is required for the postgres backend".to_string())
            })?;
            let client = backends::postgres::PostgresClient::connect(uri, config.pool_size).await?;
            client.ensure_schema().await?;
            tracing::info!(pool_size = config.pool_size, "Connected to PostgreSQL");
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_memory() {
        let config = StoreConfig {
            backend: Backend::Memory,
            ..StoreConfig::default()
        };
        let store = connect(&config).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_connect_postgres_requires_uri() {
        let err = connect(&StoreConfig::default()).await.err().unwrap();
        assert_eq!(err.code(), "STORE_ERROR");
    }
}
