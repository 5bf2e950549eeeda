//! The repository container handed to use cases.

use crate::config::LockConfig;
use crate::di::{Context, FromRef};
use crate::error::AppError;
use crate::migrations::MigrationClient;
use crate::repositories::{
    AssetRepository, AuthRequestRepository, ConfigRepository, DatasetRepository,
    DatasetSchemaRepository, LayerRepository, Lock, PluginRepository, PolicyRepository,
    ProjectRepository, PropertyRepository, PropertySchemaRepository, SceneLockRepository,
    SceneRepository, TagRepository, TransactionRepository, UserRepository, WorkspaceRepository,
};
use crate::store::Store;

/// One repository per entity kind, sharing a single store handle.
///
/// `#[derive(Context)]` makes every field extractable with `FromRef`, so
/// services can declare just the repositories they need:
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// #[from_context(Context = Container)]
/// pub struct SceneService {
///     scenes: SceneRepository,
///     layers: LayerRepository,
/// }
///
/// let service = SceneService::from_ref(&container);
/// ```
#[derive(Context, Clone)]
pub struct Container {
    pub asset: AssetRepository,
    pub auth_request: AuthRequestRepository,
    pub config: ConfigRepository,
    pub dataset_schema: DatasetSchemaRepository,
    pub dataset: DatasetRepository,
    pub layer: LayerRepository,
    pub plugin: PluginRepository,
    pub project: ProjectRepository,
    pub property_schema: PropertySchemaRepository,
    pub property: PropertyRepository,
    pub scene: SceneRepository,
    pub tag: TagRepository,
    pub workspace: WorkspaceRepository,
    pub user: UserRepository,
    pub scene_lock: SceneLockRepository,
    pub transaction: TransactionRepository,
    pub policy: PolicyRepository,
    pub lock: Lock,
    pub store: Store,
}

impl Container {
    /// Builds the container with default lock timings.
    pub async fn build(store: Store) -> Result<Self, AppError> {
        Self::build_with(store, LockConfig::default()).await
    }

    /// Creates the lock and every repository, prepares the auth request
    /// indexes and applies pending migrations.
    ///
    /// Nothing is returned unless every step succeeded; the first error is
    /// returned as is.
    pub async fn build_with(store: Store, lock_config: LockConfig) -> Result<Self, AppError> {
        tracing::info!(backend = store.backend_name(), "Building repository container");

        let lock = Lock::new(store.clone(), lock_config).await?;

        let container = Self {
            asset: AssetRepository::new(store.clone()),
            auth_request: AuthRequestRepository::new(store.clone()),
            config: ConfigRepository::new(store.clone(), lock.clone()),
            dataset_schema: DatasetSchemaRepository::new(store.clone()),
            dataset: DatasetRepository::new(store.clone()),
            layer: LayerRepository::new(store.clone()),
            plugin: PluginRepository::new(store.clone()),
            project: ProjectRepository::new(store.clone()),
            property_schema: PropertySchemaRepository::new(store.clone()),
            property: PropertyRepository::new(store.clone()),
            scene: SceneRepository::new(store.clone()),
            tag: TagRepository::new(store.clone()),
            workspace: WorkspaceRepository::new(store.clone()),
            user: UserRepository::new(store.clone()),
            scene_lock: SceneLockRepository::new(store.clone()),
            transaction: TransactionRepository::new(store.clone()),
            policy: PolicyRepository::new(store.clone()),
            lock,
            store,
        };

        container.auth_request.init().await?;

        let result = MigrationClient::from_ref(&container).migrate().await?;
        tracing::info!(
            migration = result.current_version,
            applied = result.applied.len(),
            "Repository container ready"
        );

        Ok(container)
    }
}
