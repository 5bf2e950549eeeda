//! Multi-document transactions for use cases.

use std::future::Future;

use crate::error::AppError;
use crate::store::{Store, Transaction};

/// Hands out store transactions.
#[derive(Clone)]
pub struct TransactionRepository {
    store: Store,
}

impl TransactionRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn begin(&self) -> Result<Box<dyn Transaction + '_>, AppError> {
        self.store.begin().await
    }

    /// Executes a closure within a transaction.
    ///
    /// The closure receives the transaction and is responsible for calling
    /// `commit()` or `rollback()`. If it returns without doing either, the
    /// changes are discarded when the transaction is dropped.
    ///
    /// ```ignore
    /// let id = transactions.transaction(|txn| async move {
    ///     txn.upsert_document("scene", scene_doc).await?;
    ///     txn.upsert_document("layer", root_layer_doc).await?;
    ///     txn.commit().await?;
    ///     Ok(scene_id)
    /// }).await?;
    /// ```
    pub async fn transaction<'a, F, R, Fut>(&'a self, f: F) -> Result<R, AppError>
    where
        F: FnOnce(Box<dyn Transaction + 'a>) -> Fut,
        Fut: Future<Output = Result<R, AppError>>,
    {
        let txn = self.begin().await?;
        f(txn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backends::memory::MemoryClient;
    use crate::store::{Document, QueryExt};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_transaction_commit_is_visible() {
        let store: Store = Arc::new(MemoryClient::new());
        let repo = TransactionRepository::new(store.clone());

        let n = repo
            .transaction(|txn| async move {
                let doc = Document::try_from(serde_json::json!({"id": "s1"}))?;
                txn.upsert_document("scene", doc).await?;
                txn.commit().await?;
                Ok::<_, AppError>(1)
            })
            .await
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(store.query("scene").count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_transaction_rollback_discards_writes() {
        let store: Store = Arc::new(MemoryClient::new());
        let repo = TransactionRepository::new(store.clone());

        let result: Result<(), AppError> = repo
            .transaction(|txn| async move {
                let doc = Document::try_from(serde_json::json!({"id": "s1"}))?;
                txn.upsert_document("scene", doc).await?;
                txn.rollback().await?;
                Err::<(), _>(AppError::OperationDenied)
            })
            .await;
        assert!(result.is_err());
        assert_eq!(store.query("scene").count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transaction_dropped_without_commit_is_discarded() {
        let store: Store = Arc::new(MemoryClient::new());
        let repo = TransactionRepository::new(store.clone());

        let written = repo
            .transaction(|txn| async move {
                let doc = Document::try_from(serde_json::json!({"id": "s1"}))?;
                txn.upsert_document("scene", doc).await?;
                Ok::<_, AppError>(txn.count_documents("scene", &crate::store::Filter::All).await?)
            })
            .await
            .unwrap();
        assert_eq!(written, 1);
        assert_eq!(store.query("scene").count().await.unwrap(), 0);
    }
}
