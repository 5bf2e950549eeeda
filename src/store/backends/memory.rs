//! In-process backend, used by tests and by `backend = "memory"`.
//!
//! State lives in `tokio::sync::RwLock`-guarded maps. Transactions work on a
//! snapshot taken at `begin` and replay their writes onto the shared state at
//! commit; the replay is all-or-nothing.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::store::document::{lookup_path, Document, DocumentStream, JsonMap};
use crate::store::filter::Filter;
use crate::store::traits::{
    DocumentClient, DocumentExecutor, FindOptions, IndexSpec, SortOrder, Transaction,
};

#[derive(Debug, Clone, Default)]
struct CollectionState {
    docs: BTreeMap<String, JsonMap>,
    indexes: BTreeMap<String, IndexSpec>,
}

impl CollectionState {
    /// Fails if `doc` collides with another document on a unique index.
    fn check_unique(&self, collection: &str, id: &str, doc: &JsonMap) -> Result<(), AppError> {
        for index in self.indexes.values().filter(|i| i.unique) {
            let value = match lookup_path(doc, &index.field) {
                Some(v) if !v.is_null() => v,
                _ => continue,
            };
            let taken = self
                .docs
                .iter()
                .any(|(other, body)| other != id && lookup_path(body, &index.field) == Some(value));
            if taken {
                return Err(AppError::Duplicate {
                    collection: collection.to_string(),
                    id: id.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
struct State {
    collections: HashMap<String, CollectionState>,
}

/// A write, recorded by transactions for replay at commit.
#[derive(Debug, Clone)]
enum Op {
    Insert(String, Document),
    Upsert(String, Document),
    Update(String, Filter, JsonMap),
    Delete(String, Filter),
    Index(String, IndexSpec),
}

impl State {
    fn find(&self, collection: &str, filter: &Filter, options: &FindOptions) -> Vec<Document> {
        let Some(coll) = self.collections.get(collection) else {
            return Vec::new();
        };

        let mut matched: Vec<&JsonMap> = coll.docs.values().filter(|d| filter.matches(d)).collect();

        if !options.sort.is_empty() {
            matched.sort_by(|a, b| {
                options
                    .sort
                    .iter()
                    .map(|(field, order)| {
                        let ord = compare_values(lookup_path(a, field), lookup_path(b, field));
                        match order {
                            SortOrder::Ascending => ord,
                            SortOrder::Descending => ord.reverse(),
                        }
                    })
                    .find(|o| *o != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let limit = options.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .filter_map(|body| Document::new(body.clone()).ok())
            .collect()
    }

    fn count(&self, collection: &str, filter: &Filter) -> u64 {
        self.collections
            .get(collection)
            .map(|c| c.docs.values().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0)
    }

    fn apply(&mut self, op: &Op) -> Result<u64, AppError> {
        match op {
            Op::Insert(collection, doc) => {
                let coll = self.collections.entry(collection.clone()).or_default();
                if coll.docs.contains_key(doc.id()) {
                    return Err(AppError::Duplicate {
                        collection: collection.clone(),
                        id: doc.id().to_string(),
                    });
                }
                coll.check_unique(collection, doc.id(), doc.as_map())?;
                coll.docs.insert(doc.id().to_string(), doc.as_map().clone());
                Ok(1)
            }
            Op::Upsert(collection, doc) => {
                let coll = self.collections.entry(collection.clone()).or_default();
                coll.check_unique(collection, doc.id(), doc.as_map())?;
                coll.docs.insert(doc.id().to_string(), doc.as_map().clone());
                Ok(1)
            }
            Op::Update(collection, filter, set) => {
                let Some(coll) = self.collections.get_mut(collection) else {
                    return Ok(0);
                };
                let ids: Vec<String> = coll
                    .docs
                    .iter()
                    .filter(|(_, d)| filter.matches(d))
                    .map(|(id, _)| id.clone())
                    .collect();
                for id in &ids {
                    let mut doc = Document::new(coll.docs[id].clone())?;
                    doc.merge(set);
                    coll.check_unique(collection, id, doc.as_map())?;
                    coll.docs.insert(id.clone(), doc.into_inner());
                }
                Ok(ids.len() as u64)
            }
            Op::Delete(collection, filter) => {
                let Some(coll) = self.collections.get_mut(collection) else {
                    return Ok(0);
                };
                let before = coll.docs.len();
                coll.docs.retain(|_, d| !filter.matches(d));
                Ok((before - coll.docs.len()) as u64)
            }
            Op::Index(collection, index) => {
                let coll = self.collections.entry(collection.clone()).or_default();
                let name = index.name(collection);
                if coll.indexes.contains_key(&name) {
                    return Ok(0);
                }
                coll.indexes.insert(name.clone(), index.clone());
                let existing: Vec<(String, JsonMap)> = coll
                    .docs
                    .iter()
                    .map(|(id, d)| (id.clone(), d.clone()))
                    .collect();
                for (id, doc) in &existing {
                    if let Err(e) = coll.check_unique(collection, id, doc) {
                        coll.indexes.remove(&name);
                        return Err(e);
                    }
                }
                Ok(0)
            }
        }
    }
}

/// Orders JSON values: missing/null, booleans, numbers, strings, then the rest
/// by their text form.
fn compare_values(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    fn rank(v: Option<&JsonValue>) -> u8 {
        match v {
            None | Some(JsonValue::Null) => 0,
            Some(JsonValue::Bool(_)) => 1,
            Some(JsonValue::Number(_)) => 2,
            Some(JsonValue::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(JsonValue::Bool(x)), Some(JsonValue::Bool(y))) => x.cmp(y),
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(JsonValue::String(x)), Some(JsonValue::String(y))) => x.cmp(y),
        (Some(x), Some(y)) if rank(a) == 4 && rank(b) == 4 => x.to_string().cmp(&y.to_string()),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn stream(docs: Vec<Document>) -> DocumentStream<'static> {
    Box::pin(futures::stream::iter(docs.into_iter().map(Ok)))
}

/// In-memory document store.
///
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryClient {
    state: Arc<RwLock<State>>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    async fn write(&self, op: Op) -> Result<u64, AppError> {
        self.state.write().await.apply(&op)
    }
}

#[async_trait]
impl DocumentExecutor for MemoryClient {
    async fn find_documents(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<DocumentStream<'_>, AppError> {
        Ok(stream(self.state.read().await.find(collection, filter, options)))
    }

    async fn count_documents(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        Ok(self.state.read().await.count(collection, filter))
    }

    async fn insert_document(&self, collection: &str, doc: Document) -> Result<(), AppError> {
        self.write(Op::Insert(collection.to_string(), doc)).await?;
        Ok(())
    }

    async fn upsert_document(&self, collection: &str, doc: Document) -> Result<(), AppError> {
        self.write(Op::Upsert(collection.to_string(), doc)).await?;
        Ok(())
    }

    async fn update_documents(
        &self,
        collection: &str,
        filter: &Filter,
        set: JsonMap,
    ) -> Result<u64, AppError> {
        self.write(Op::Update(collection.to_string(), filter.clone(), set))
            .await
    }

    async fn delete_documents(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        self.write(Op::Delete(collection.to_string(), filter.clone()))
            .await
    }

    async fn ensure_index(&self, collection: &str, index: &IndexSpec) -> Result<(), AppError> {
        self.write(Op::Index(collection.to_string(), index.clone()))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentClient for MemoryClient {
    async fn begin(&self) -> Result<Box<dyn Transaction + '_>, AppError> {
        let snapshot = self.state.read().await.clone();
        Ok(Box::new(MemoryTransaction {
            shared: self.state.clone(),
            working: Mutex::new(snapshot),
            ops: Mutex::new(Vec::new()),
            finished: false,
        }))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Transaction over a snapshot of the memory store.
pub struct MemoryTransaction {
    shared: Arc<RwLock<State>>,
    working: Mutex<State>,
    ops: Mutex<Vec<Op>>,
    finished: bool,
}

impl MemoryTransaction {
    fn working(&self) -> Result<std::sync::MutexGuard<'_, State>, AppError> {
        self.working
            .lock()
            .map_err(|_| AppError::Internal("memory transaction poisoned".to_string()))
    }

    fn write(&self, op: Op) -> Result<u64, AppError> {
        let affected = self.working()?.apply(&op)?;
        self.ops
            .lock()
            .map_err(|_| AppError::Internal("memory transaction poisoned".to_string()))?
            .push(op);
        Ok(affected)
    }
}

#[async_trait]
impl DocumentExecutor for MemoryTransaction {
    async fn find_documents(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<DocumentStream<'_>, AppError> {
        Ok(stream(self.working()?.find(collection, filter, options)))
    }

    async fn count_documents(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        Ok(self.working()?.count(collection, filter))
    }

    async fn insert_document(&self, collection: &str, doc: Document) -> Result<(), AppError> {
        self.write(Op::Insert(collection.to_string(), doc))?;
        Ok(())
    }

    async fn upsert_document(&self, collection: &str, doc: Document) -> Result<(), AppError> {
        self.write(Op::Upsert(collection.to_string(), doc))?;
        Ok(())
    }

    async fn update_documents(
        &self,
        collection: &str,
        filter: &Filter,
        set: JsonMap,
    ) -> Result<u64, AppError> {
        self.write(Op::Update(collection.to_string(), filter.clone(), set))
    }

    async fn delete_documents(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        self.write(Op::Delete(collection.to_string(), filter.clone()))
    }

    async fn ensure_index(&self, collection: &str, index: &IndexSpec) -> Result<(), AppError> {
        self.write(Op::Index(collection.to_string(), index.clone()))?;
        Ok(())
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(mut self: Box<Self>) -> Result<(), AppError> {
        self.finished = true;
        let ops = std::mem::take(
            &mut *self
                .ops
                .lock()
                .map_err(|_| AppError::Internal("memory transaction poisoned".to_string()))?,
        );

        let mut shared = self.shared.write().await;
        let mut next = shared.clone();
        for op in &ops {
            next.apply(op)?;
        }
        *shared = next;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), AppError> {
        self.finished = true;
        Ok(())
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("MemoryTransaction dropped without commit or rollback - changes discarded");
        }
    }
}
