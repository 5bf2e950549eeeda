use crate::error::AppError;
use crate::id::{PluginId, SceneId};
use crate::models::Plugin;
use crate::repositories::collection::Collection;
use crate::repositories::scope::SceneFilter;
use crate::store::{Filter, Store, SCENE_FIELD};

/// Installed plugins.
///
/// System plugins (ids without a version) have no scene, so they pass every
/// read scope and cannot be written through the repository.
#[derive(Clone)]
pub struct PluginRepository {
    plugins: Collection<Plugin>,
    filter: SceneFilter,
}

impl PluginRepository {
    pub fn new(store: Store) -> Self {
        Self {
            plugins: Collection::new(store),
            filter: SceneFilter::default(),
        }
    }

    pub fn filtered(&self, filter: &SceneFilter) -> Self {
        Self {
            plugins: self.plugins.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: &PluginId) -> Result<Plugin, AppError> {
        self.plugins
            .get(self.filter.read_optional(Filter::id(id)), id)
            .await
    }

    /// Fetches plugins aligned with `ids`. System plugins are found regardless
    /// of scope; scene plugins only in readable scenes.
    pub async fn find_by_ids(&self, ids: &[PluginId]) -> Result<Vec<Option<Plugin>>, AppError> {
        self.plugins
            .find_by_ids(ids, self.filter.read_optional(Filter::All))
            .await
    }

    /// Plugins installed into the scene, system plugins excluded.
    pub async fn find_by_scene(&self, scene: SceneId) -> Result<Vec<Plugin>, AppError> {
        if !self.filter.can_read(scene) {
            return Ok(Vec::new());
        }
        self.plugins.find(Filter::eq(SCENE_FIELD, scene)).await
    }

    pub async fn save(&self, plugin: &Plugin) -> Result<(), AppError> {
        if plugin.id.is_system() || !self.filter.can_write_optional(plugin.scene) {
            return Err(AppError::OperationDenied);
        }
        self.plugins.save(plugin).await
    }

    pub async fn remove(&self, id: &PluginId) -> Result<(), AppError> {
        if id.is_system() {
            return Err(AppError::OperationDenied);
        }
        self.plugins
            .remove_one(self.filter.write_optional(Filter::id(id)), id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backends::memory::MemoryClient;
    use crate::store::Document;
    use std::sync::Arc;

    fn plugin(id: PluginId, scene: Option<SceneId>) -> Plugin {
        Plugin {
            name: id.name().to_string(),
            id,
            author: None,
            scene,
            extensions: Vec::new(),
            schema: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_ids_includes_system_plugins() {
        let store: Store = Arc::new(MemoryClient::new());
        let repo = PluginRepository::new(store.clone());
        let scene = SceneId::new();

        // System plugins are provisioned directly, not through the repository
        let builtin = plugin(PluginId::new("builtin", None), None);
        store
            .upsert_document("plugin", Document::from_entity(&builtin).unwrap())
            .await
            .unwrap();

        let own = plugin(PluginId::new("chart", Some("1.0.0")), Some(scene));
        let foreign = plugin(PluginId::new("map", Some("2.1.0")), Some(SceneId::new()));
        repo.save(&own).await.unwrap();
        repo.save(&foreign).await.unwrap();

        let scoped = repo.filtered(&SceneFilter::new(Some(vec![scene]), None));
        let ids = [builtin.id.clone(), own.id.clone(), foreign.id.clone()];
        let found = scoped.find_by_ids(&ids).await.unwrap();
        assert_eq!(found, vec![Some(builtin.clone()), Some(own), None]);

        assert_eq!(scoped.find_by_id(&builtin.id).await.unwrap(), builtin);
        assert_eq!(scoped.find_by_scene(scene).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_system_plugins_are_read_only() {
        let repo = PluginRepository::new(Arc::new(MemoryClient::new()));
        let builtin = plugin(PluginId::new("builtin", None), None);
        assert!(matches!(repo.save(&builtin).await, Err(AppError::OperationDenied)));
        assert!(matches!(
            repo.remove(&builtin.id).await,
            Err(AppError::OperationDenied)
        ));
    }
}
