//! Store wrappers for exercising error paths in unit tests.

use async_trait::async_trait;

use crate::error::AppError;
use crate::store::backends::memory::MemoryClient;
use crate::store::{
    Document, DocumentClient, DocumentExecutor, DocumentStream, Filter, FindOptions, IndexSpec,
    JsonMap, Transaction,
};

/// In-memory store whose transactions cannot be rolled back.
///
/// `rollback` discards the transaction like a drop would, then reports a
/// store error.
#[derive(Default)]
pub struct BrokenRollbackClient {
    inner: MemoryClient,
}

impl BrokenRollbackClient {
    pub fn new() -> Self {
        Self::default()
    }
}

struct BrokenRollbackTransaction<'a> {
    inner: Box<dyn Transaction + 'a>,
}

macro_rules! delegate_executor {
    ($ty:ty, $field:ident $(, $lt:lifetime)?) => {
        #[async_trait]
        impl<$($lt)?> DocumentExecutor for $ty {
            async fn find_documents(
                &self,
                collection: &str,
                filter: &Filter,
                options: &FindOptions,
            ) -> Result<DocumentStream<'_>, AppError> {
                self.$field.find_documents(collection, filter, options).await
            }

            async fn count_documents(
                &self,
                collection: &str,
                filter: &Filter,
            ) -> Result<u64, AppError> {
                self.$field.count_documents(collection, filter).await
            }

            async fn insert_document(&self, collection: &str, doc: Document) -> Result<(), AppError> {
                self.$field.insert_document(collection, doc).await
            }

            async fn upsert_document(&self, collection: &str, doc: Document) -> Result<(), AppError> {
                self.$field.upsert_document(collection, doc).await
            }

            async fn update_documents(
                &self,
                collection: &str,
                filter: &Filter,
                set: JsonMap,
            ) -> Result<u64, AppError> {
                self.$field.update_documents(collection, filter, set).await
            }

            async fn delete_documents(
                &self,
                collection: &str,
                filter: &Filter,
            ) -> Result<u64, AppError> {
                self.$field.delete_documents(collection, filter).await
            }

            async fn ensure_index(&self, collection: &str, index: &IndexSpec) -> Result<(), AppError> {
                self.$field.ensure_index(collection, index).await
            }
        }
    };
}

delegate_executor!(BrokenRollbackClient, inner);
delegate_executor!(BrokenRollbackTransaction<'a>, inner, 'a);

#[async_trait]
impl DocumentClient for BrokenRollbackClient {
    async fn begin(&self) -> Result<Box<dyn Transaction + '_>, AppError> {
        let inner = self.inner.begin().await?;
        Ok(Box::new(BrokenRollbackTransaction { inner }))
    }

    fn backend_name(&self) -> &'static str {
        "broken-rollback"
    }
}

#[async_trait]
impl<'a> Transaction for BrokenRollbackTransaction<'a> {
    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.inner.commit().await
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        drop(self.inner);
        Err(AppError::Store("rollback failed".to_string()))
    }
}
