//! Container construction against the in-memory store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use geoscene::config::LockConfig;
use geoscene::error::AppError;
use geoscene::id::{LayerId, ProjectId, PropertyId, SceneId, WorkspaceId};
use geoscene::migrations::create_register;
use geoscene::models::{Layer, Scene};
use geoscene::repositories::{Container, LayerRepository, SceneFilter};
use geoscene::store::backends::memory::MemoryClient;
use geoscene::store::{
    DocumentClient, DocumentExecutor, DocumentStream, Filter, FindOptions, IndexSpec, JsonMap,
    Document, Store, Transaction,
};
use geoscene::FromRef;

/// Which step of container construction the store should break.
#[derive(Clone, Copy)]
enum FailAt {
    AuthRequestIndex,
    Begin,
}

/// Delegates to an in-memory store, failing one kind of call.
struct FailingStore {
    inner: MemoryClient,
    fail_at: FailAt,
    tripped: AtomicBool,
}

impl FailingStore {
    fn new(fail_at: FailAt) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryClient::new(),
            fail_at,
            tripped: AtomicBool::new(false),
        })
    }

    fn fail(&self) -> AppError {
        self.tripped.store(true, Ordering::SeqCst);
        AppError::Store("injected failure".to_string())
    }
}

#[async_trait]
impl DocumentExecutor for FailingStore {
    async fn find_documents(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<DocumentStream<'_>, AppError> {
        self.inner.find_documents(collection, filter, options).await
    }

    async fn count_documents(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        self.inner.count_documents(collection, filter).await
    }

    async fn insert_document(&self, collection: &str, doc: Document) -> Result<(), AppError> {
        self.inner.insert_document(collection, doc).await
    }

    async fn upsert_document(&self, collection: &str, doc: Document) -> Result<(), AppError> {
        self.inner.upsert_document(collection, doc).await
    }

    async fn update_documents(
        &self,
        collection: &str,
        filter: &Filter,
        set: JsonMap,
    ) -> Result<u64, AppError> {
        self.inner.update_documents(collection, filter, set).await
    }

    async fn delete_documents(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        self.inner.delete_documents(collection, filter).await
    }

    async fn ensure_index(&self, collection: &str, index: &IndexSpec) -> Result<(), AppError> {
        if matches!(self.fail_at, FailAt::AuthRequestIndex) && collection == "authRequest" {
            return Err(self.fail());
        }
        self.inner.ensure_index(collection, index).await
    }
}

#[async_trait]
impl DocumentClient for FailingStore {
    async fn begin(&self) -> Result<Box<dyn Transaction + '_>, AppError> {
        if matches!(self.fail_at, FailAt::Begin) {
            return Err(self.fail());
        }
        self.inner.begin().await
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

#[tokio::test]
async fn test_build_runs_migrations() {
    let store: Store = Arc::new(MemoryClient::new());
    let container = Container::build(store).await.unwrap();

    let config = container.config.load().await.unwrap();
    assert_eq!(config.migration, create_register().latest_version());

    // The config lock was released by the migration run
    container.config.lock_and_load().await.unwrap();
    container.config.unlock().await.unwrap();
}

#[tokio::test]
async fn test_build_twice_on_same_store() {
    let store: Store = Arc::new(MemoryClient::new());
    Container::build(store.clone()).await.unwrap();
    let second = Container::build(store).await.unwrap();
    assert_eq!(
        second.config.load().await.unwrap().migration,
        create_register().latest_version()
    );
}

#[tokio::test]
async fn test_auth_request_init_failure_aborts() {
    let failing = FailingStore::new(FailAt::AuthRequestIndex);
    let store: Store = failing.clone();

    let err = Container::build(store).await.err().unwrap();
    assert!(matches!(err, AppError::Store(ref m) if m == "injected failure"));
    assert!(failing.tripped.load(Ordering::SeqCst));

    // Migrations never ran
    let configs = failing
        .inner
        .count_documents("config", &Filter::All)
        .await
        .unwrap();
    assert_eq!(configs, 0);
}

#[tokio::test]
async fn test_migration_failure_aborts() {
    let failing = FailingStore::new(FailAt::Begin);
    let store: Store = failing.clone();

    let err = Container::build(store).await.err().unwrap();
    assert!(matches!(err, AppError::Store(_)));
    assert!(failing.tripped.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_lock_ttl_beyond_date_range_fails_build() {
    let store: Store = Arc::new(MemoryClient::new());
    let lock = LockConfig {
        ttl_secs: 10_000_000_000_000,
        ..LockConfig::default()
    };

    let err = Container::build_with(store, lock).await.err().unwrap();
    assert_eq!(err.code(), "CONFIG_ERROR");
}

#[tokio::test]
async fn test_repositories_share_the_store() {
    let store: Store = Arc::new(MemoryClient::new());
    let container = Container::build(store).await.unwrap();

    let ws = WorkspaceId::new();
    let scene = Scene::new(ProjectId::new(), ws, LayerId::new(), PropertyId::new());
    container.scene.save(&scene).await.unwrap();

    let root = Layer::group(scene.id, "root", Vec::new());
    let layers = LayerRepository::from_ref(&container);
    layers.save(&root).await.unwrap();

    assert_eq!(container.layer.find_by_scene(scene.id).await.unwrap(), vec![root]);
    assert_eq!(
        container.scene.find_by_workspace(&[ws]).await.unwrap(),
        vec![scene]
    );
}

#[tokio::test]
async fn test_filtered_repository_from_container() {
    let store: Store = Arc::new(MemoryClient::new());
    let container = Container::build(store).await.unwrap();

    let (mine, theirs) = (SceneId::new(), SceneId::new());
    let visible = Layer::item(mine, "visible");
    let hidden = Layer::item(theirs, "hidden");
    container
        .layer
        .save_all(&[visible.clone(), hidden.clone()])
        .await
        .unwrap();

    let scoped = container
        .layer
        .filtered(&SceneFilter::new(Some(vec![mine]), Some(vec![mine])));
    assert_eq!(
        scoped.find_by_ids(&[visible.id, hidden.id]).await.unwrap(),
        vec![Some(visible), None]
    );
    assert!(scoped.find_by_id(hidden.id).await.unwrap_err().is_not_found());
    assert!(matches!(
        scoped.save(&hidden).await,
        Err(AppError::OperationDenied)
    ));
}
