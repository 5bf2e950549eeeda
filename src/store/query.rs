//! Query builder for fluent document lookups.

use futures::{StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::store::document::{Document, DocumentStream};
use crate::store::filter::Filter;
use crate::store::traits::{DocumentExecutor, FindOptions, SortOrder};

/// A builder for constructing and executing finds.
///
/// # Example
///
/// ```ignore
/// let layers: Vec<Layer> = store
///     .query("layer")
///     .filter(Filter::eq("scene", scene_id))
///     .sort("name", SortOrder::Ascending)
///     .limit(50)
///     .fetch_entities()
///     .await?;
/// ```
pub struct Query<'a, E: DocumentExecutor + ?Sized> {
    executor: &'a E,
    collection: String,
    filter: Filter,
    options: FindOptions,
}

impl<'a, E: DocumentExecutor + ?Sized> Query<'a, E> {
    /// Creates a find over every document in `collection`.
    pub fn new(executor: &'a E, collection: &str) -> Self {
        Self {
            executor,
            collection: collection.to_string(),
            filter: Filter::All,
            options: FindOptions::default(),
        }
    }

    /// Conjoins a filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = self.filter.and(filter);
        self
    }

    pub fn sort(mut self, field: &str, order: SortOrder) -> Self {
        self.options.sort.push((field.to_string(), order));
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.options.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.options.limit = Some(limit);
        self
    }

    /// Executes the find and returns a stream of documents.
    pub async fn execute(self) -> Result<DocumentStream<'a>, AppError> {
        tracing::debug!(collection = %self.collection, filter = %self.filter, "find");
        self.executor
            .find_documents(&self.collection, &self.filter, &self.options)
            .await
    }

    /// Executes the find and collects all documents.
    pub async fn fetch_all(self) -> Result<Vec<Document>, AppError> {
        self.execute().await?.try_collect().await
    }

    /// Returns the first matching document, if any.
    pub async fn fetch_one(self) -> Result<Option<Document>, AppError> {
        let mut stream = self.limit(1).execute().await?;
        stream.next().await.transpose()
    }

    /// Collects and deserializes all matching documents.
    pub async fn fetch_entities<T: DeserializeOwned>(self) -> Result<Vec<T>, AppError> {
        self.fetch_all()
            .await?
            .into_iter()
            .map(Document::into_entity)
            .collect()
    }

    /// Deserializes the first matching document, if any.
    pub async fn fetch_entity<T: DeserializeOwned>(self) -> Result<Option<T>, AppError> {
        self.fetch_one()
            .await?
            .map(Document::into_entity)
            .transpose()
    }

    /// Counts matching documents. Skip, limit and sort are ignored.
    pub async fn count(self) -> Result<u64, AppError> {
        self.executor
            .count_documents(&self.collection, &self.filter)
            .await
    }

    /// Deletes matching documents.
    pub async fn delete(self) -> Result<u64, AppError> {
        tracing::debug!(collection = %self.collection, filter = %self.filter, "delete");
        self.executor
            .delete_documents(&self.collection, &self.filter)
            .await
    }
}

/// Extension trait providing a convenient `query()` method.
///
/// Implemented for every [`DocumentExecutor`], trait objects included, so
/// `store.query("scene")` works on an `Arc<dyn DocumentClient>` and on a
/// `Box<dyn Transaction>` alike.
pub trait QueryExt: DocumentExecutor {
    fn query(&self, collection: &str) -> Query<'_, Self> {
        Query::new(self, collection)
    }
}

impl<E: DocumentExecutor + ?Sized> QueryExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::document::JsonMap;
    use crate::store::traits::IndexSpec;
    use serde_json::json;
    use std::sync::Mutex;

    // Records the last find so tests can assert what the builder sent
    #[derive(Default)]
    struct RecordingExecutor {
        last: Mutex<Option<(String, Filter, FindOptions)>>,
    }

    #[async_trait::async_trait]
    impl DocumentExecutor for RecordingExecutor {
        async fn find_documents(
            &self,
            collection: &str,
            filter: &Filter,
            options: &FindOptions,
        ) -> Result<DocumentStream<'_>, AppError> {
            *self.last.lock().unwrap() =
                Some((collection.to_string(), filter.clone(), options.clone()));
            let doc = Document::try_from(json!({"id": "a", "name": "first"}))?;
            Ok(Box::pin(futures::stream::iter(vec![Ok(doc)])))
        }

        async fn count_documents(&self, _: &str, _: &Filter) -> Result<u64, AppError> {
            Ok(7)
        }

        async fn insert_document(&self, _: &str, _: Document) -> Result<(), AppError> {
            Ok(())
        }

        async fn upsert_document(&self, _: &str, _: Document) -> Result<(), AppError> {
            Ok(())
        }

        async fn update_documents(&self, _: &str, _: &Filter, _: JsonMap) -> Result<u64, AppError> {
            Ok(0)
        }

        async fn delete_documents(&self, _: &str, _: &Filter) -> Result<u64, AppError> {
            Ok(0)
        }

        async fn ensure_index(&self, _: &str, _: &IndexSpec) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_builder_passes_filter_and_options() {
        let executor = RecordingExecutor::default();
        let docs = executor
            .query("layer")
            .filter(Filter::eq("scene", "s1"))
            .filter(Filter::eq("kind", "group"))
            .sort("name", SortOrder::Descending)
            .skip(10)
            .limit(5)
            .fetch_all()
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);

        let (collection, filter, options) = executor.last.lock().unwrap().clone().unwrap();
        assert_eq!(collection, "layer");
        assert_eq!(
            filter,
            Filter::And(vec![Filter::eq("scene", "s1"), Filter::eq("kind", "group")])
        );
        assert_eq!(options.sort, vec![("name".to_string(), SortOrder::Descending)]);
        assert_eq!(options.skip, Some(10));
        assert_eq!(options.limit, Some(5));
    }

    #[tokio::test]
    async fn test_fetch_one_limits_to_one() {
        let executor = RecordingExecutor::default();
        let doc = executor.query("scene").fetch_one().await.unwrap().unwrap();
        assert_eq!(doc.id(), "a");

        let (_, filter, options) = executor.last.lock().unwrap().clone().unwrap();
        assert_eq!(filter, Filter::All);
        assert_eq!(options.limit, Some(1));
    }

    #[tokio::test]
    async fn test_query_through_trait_object() {
        let executor = RecordingExecutor::default();
        let dyn_executor: &dyn DocumentExecutor = &executor;
        assert_eq!(dyn_executor.query("asset").count().await.unwrap(), 7);
    }
}
