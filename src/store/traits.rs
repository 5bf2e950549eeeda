//! Core traits for document store abstraction.
//!
//! This module defines the trait hierarchy that backends must implement:
//!
//! - [`DocumentExecutor`] - Reads and writes documents in named collections
//! - [`Transaction`] - Transaction lifecycle management
//! - [`DocumentClient`] - Connection pool and transaction creation
//!
//! All three are object-safe so that repositories can share one
//! `Arc<dyn DocumentClient>` regardless of the backend behind it.

use async_trait::async_trait;

use crate::error::AppError;
use crate::store::document::{Document, DocumentStream, JsonMap};
use crate::store::filter::Filter;

/// Sort direction for a find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Options applied to a find, after filtering.
///
/// Without an explicit sort, documents come back ordered by `id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub sort: Vec<(String, SortOrder)>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// A single-field secondary index on a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    /// Dotted path of the indexed field.
    pub field: String,
    /// Reject a second document with the same non-null value.
    pub unique: bool,
}

impl IndexSpec {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            unique: false,
        }
    }

    pub fn unique(field: &str) -> Self {
        Self {
            field: field.to_string(),
            unique: true,
        }
    }

    /// Deterministic index name, e.g. `authRequest_code_uniq`.
    pub fn name(&self, collection: &str) -> String {
        let field = self.field.replace('.', "_");
        if self.unique {
            format!("{}_{}_uniq", collection, field)
        } else {
            format!("{}_{}_idx", collection, field)
        }
    }
}

/// Executes document operations against named collections.
///
/// Every document carries a string `id` key that is unique within its
/// collection.
#[async_trait]
pub trait DocumentExecutor: Send + Sync {
    /// Returns the documents matching `filter`, shaped by `options`.
    async fn find_documents(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<DocumentStream<'_>, AppError>;

    /// Counts the documents matching `filter`.
    async fn count_documents(&self, collection: &str, filter: &Filter) -> Result<u64, AppError>;

    /// Inserts a new document.
    ///
    /// Fails with [`AppError::Duplicate`] if the id, or a uniquely indexed
    /// field, is already taken.
    async fn insert_document(&self, collection: &str, doc: Document) -> Result<(), AppError>;

    /// Inserts or replaces the document with the same id.
    async fn upsert_document(&self, collection: &str, doc: Document) -> Result<(), AppError>;

    /// Sets top-level keys on every matching document. Returns the number of
    /// documents touched.
    async fn update_documents(
        &self,
        collection: &str,
        filter: &Filter,
        set: JsonMap,
    ) -> Result<u64, AppError>;

    /// Deletes every matching document. Returns the number deleted.
    async fn delete_documents(&self, collection: &str, filter: &Filter) -> Result<u64, AppError>;

    /// Creates the index if it does not exist yet.
    async fn ensure_index(&self, collection: &str, index: &IndexSpec) -> Result<(), AppError>;
}

/// Transaction lifecycle management.
///
/// Writes made through the transaction become visible to other callers only
/// after [`commit`](Transaction::commit).
#[async_trait]
pub trait Transaction: DocumentExecutor {
    /// Commits the transaction, making all changes permanent.
    async fn commit(self: Box<Self>) -> Result<(), AppError>;

    /// Rolls back the transaction, discarding all changes.
    async fn rollback(self: Box<Self>) -> Result<(), AppError>;
}

/// A document store client that can begin transactions.
///
/// The executor methods on the client itself are auto-commit.
#[async_trait]
pub trait DocumentClient: DocumentExecutor {
    /// Begins a new transaction.
    ///
    /// ```ignore
    /// let txn = store.begin().await?;
    /// txn.upsert_document("scene", doc).await?;
    /// txn.commit().await?;
    /// ```
    async fn begin(&self) -> Result<Box<dyn Transaction + '_>, AppError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
