//! Typed access to one collection of entities.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::error::AppError;
use crate::models::Entity;
use crate::repositories::pagination::{PageInfo, Pagination};
use crate::store::{Document, Filter, QueryExt, SortOrder, Store, ID_KEY};

/// Reads and writes entities of type `T` in `T::COLLECTION`.
///
/// Callers apply their own scope filters before calling in.
pub struct Collection<T> {
    store: Store,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn find_one(&self, filter: Filter) -> Result<Option<T>, AppError> {
        self.store
            .query(T::COLLECTION)
            .filter(filter)
            .fetch_entity()
            .await
    }

    /// Like [`Collection::find_one`], failing with `NotFound` on a miss.
    pub async fn get(&self, filter: Filter, id: impl ToString) -> Result<T, AppError> {
        self.find_one(filter)
            .await?
            .ok_or_else(|| AppError::not_found(T::KIND, id))
    }

    pub async fn find(&self, filter: Filter) -> Result<Vec<T>, AppError> {
        self.store
            .query(T::COLLECTION)
            .filter(filter)
            .fetch_entities()
            .await
    }

    pub async fn find_sorted(
        &self,
        filter: Filter,
        field: &str,
        order: SortOrder,
    ) -> Result<Vec<T>, AppError> {
        self.store
            .query(T::COLLECTION)
            .filter(filter)
            .sort(field, order)
            .fetch_entities()
            .await
    }

    /// Fetches `ids` in one query. The result is aligned with `ids`; misses
    /// (and entities excluded by `filter`) are `None`.
    pub async fn find_by_ids(&self, ids: &[T::Id], filter: Filter) -> Result<Vec<Option<T>>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: HashMap<String, T> = self
            .find(Filter::ids(ids).and(filter))
            .await?
            .into_iter()
            .map(|entity| (entity.id().to_string(), entity))
            .collect();

        Ok(ids
            .iter()
            .map(|id| found.get(&id.to_string()).cloned())
            .collect())
    }

    pub async fn count(&self, filter: Filter) -> Result<u64, AppError> {
        self.store.query(T::COLLECTION).filter(filter).count().await
    }

    /// Returns one page of matches in id order, with its page info.
    pub async fn paginate(
        &self,
        filter: Filter,
        pagination: Pagination,
    ) -> Result<(Vec<T>, PageInfo), AppError> {
        let total = self.count(filter.clone()).await?;
        let items: Vec<T> = self
            .store
            .query(T::COLLECTION)
            .filter(filter)
            .sort(ID_KEY, SortOrder::Ascending)
            .skip(pagination.offset)
            .limit(pagination.limit)
            .fetch_entities()
            .await?;

        let ids: Vec<String> = items.iter().map(|e| e.id().to_string()).collect();
        Ok((items, PageInfo::for_page(pagination, &ids, total)))
    }

    pub async fn save(&self, entity: &T) -> Result<(), AppError> {
        let doc = Document::from_entity(entity)?;
        tracing::debug!(collection = T::COLLECTION, id = %doc.id(), "save");
        self.store.upsert_document(T::COLLECTION, doc).await
    }

    /// Saves every entity in one transaction.
    pub async fn save_all(&self, entities: &[T]) -> Result<(), AppError> {
        if entities.is_empty() {
            return Ok(());
        }

        let docs = entities
            .iter()
            .map(Document::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        let txn = self.store.begin().await?;
        for doc in docs {
            if let Err(e) = txn.upsert_document(T::COLLECTION, doc).await {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(collection = T::COLLECTION, "rollback failed: {}", rollback_err);
                }
                return Err(e);
            }
        }
        txn.commit().await
    }

    /// Deletes matches, returning how many were removed.
    pub async fn remove(&self, filter: Filter) -> Result<u64, AppError> {
        self.store.query(T::COLLECTION).filter(filter).delete().await
    }

    /// Deletes exactly one document, failing with `NotFound` if nothing matched.
    pub async fn remove_one(&self, filter: Filter, id: impl ToString) -> Result<(), AppError> {
        match self.remove(filter).await? {
            0 => Err(AppError::not_found(T::KIND, id)),
            _ => Ok(()),
        }
    }
}
