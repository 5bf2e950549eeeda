use crate::error::AppError;
use crate::id::{LayerId, PropertyId, SceneId};
use crate::models::Layer;
use crate::repositories::collection::Collection;
use crate::repositories::scope::SceneFilter;
use crate::store::{Filter, Store, SCENE_FIELD};

#[derive(Clone)]
pub struct LayerRepository {
    layers: Collection<Layer>,
    filter: SceneFilter,
}

impl LayerRepository {
    pub fn new(store: Store) -> Self {
        Self {
            layers: Collection::new(store),
            filter: SceneFilter::default(),
        }
    }

    pub fn filtered(&self, filter: &SceneFilter) -> Self {
        Self {
            layers: self.layers.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: LayerId) -> Result<Layer, AppError> {
        self.layers.get(self.filter.read(Filter::id(id)), id).await
    }

    pub async fn find_by_ids(&self, ids: &[LayerId]) -> Result<Vec<Option<Layer>>, AppError> {
        self.layers.find_by_ids(ids, self.filter.read(Filter::All)).await
    }

    pub async fn find_by_scene(&self, scene: SceneId) -> Result<Vec<Layer>, AppError> {
        if !self.filter.can_read(scene) {
            return Ok(Vec::new());
        }
        self.layers.find(Filter::eq(SCENE_FIELD, scene)).await
    }

    /// The group holding `id` among its children.
    pub async fn find_parent_by_id(&self, id: LayerId) -> Result<Layer, AppError> {
        self.layers
            .get(self.filter.read(Filter::contains("layers", id)), id)
            .await
    }

    /// The layer whose own property or infobox property is `property`.
    pub async fn find_by_property(&self, property: PropertyId) -> Result<Layer, AppError> {
        let filter = Filter::Or(vec![
            Filter::eq("property", property),
            Filter::eq("infobox.property", property),
        ]);
        self.layers
            .get(self.filter.read(filter), property)
            .await
    }

    pub async fn save(&self, layer: &Layer) -> Result<(), AppError> {
        if !self.filter.can_write(layer.scene) {
            return Err(AppError::OperationDenied);
        }
        self.layers.save(layer).await
    }

    pub async fn save_all(&self, layers: &[Layer]) -> Result<(), AppError> {
        if layers.iter().any(|l| !self.filter.can_write(l.scene)) {
            return Err(AppError::OperationDenied);
        }
        self.layers.save_all(layers).await
    }

    pub async fn remove(&self, id: LayerId) -> Result<(), AppError> {
        self.layers
            .remove_one(self.filter.write(Filter::id(id)), id)
            .await
    }

    /// Deletes `ids`, skipping those outside the writable scenes.
    pub async fn remove_all(&self, ids: &[LayerId]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.layers.remove(self.filter.write(Filter::ids(ids))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Infobox, LayerKind};
    use crate::store::backends::memory::MemoryClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_parent_by_id() {
        let repo = LayerRepository::new(Arc::new(MemoryClient::new()));
        let scene = SceneId::new();
        let child = Layer::item(scene, "marker");
        let parent = Layer::group(scene, "root", vec![child.id]);
        repo.save_all(&[child.clone(), parent.clone()]).await.unwrap();

        let found = repo.find_parent_by_id(child.id).await.unwrap();
        assert_eq!(found.id, parent.id);
        assert!(matches!(found.kind, LayerKind::Group { .. }));
        assert!(repo
            .find_parent_by_id(parent.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_property_checks_infobox() {
        let repo = LayerRepository::new(Arc::new(MemoryClient::new()));
        let scene = SceneId::new();
        let mut own = Layer::item(scene, "own");
        own.property = Some(PropertyId::new());
        let mut boxed = Layer::item(scene, "boxed");
        let infobox_property = PropertyId::new();
        boxed.infobox = Some(Infobox {
            property: infobox_property,
            fields: Vec::new(),
        });
        repo.save_all(&[own.clone(), boxed.clone()]).await.unwrap();

        let property = own.property.unwrap();
        assert_eq!(repo.find_by_property(property).await.unwrap().id, own.id);
        assert_eq!(
            repo.find_by_property(infobox_property).await.unwrap().id,
            boxed.id
        );
    }

    #[tokio::test]
    async fn test_remove_all_respects_scope() {
        let repo = LayerRepository::new(Arc::new(MemoryClient::new()));
        let (mine, theirs) = (SceneId::new(), SceneId::new());
        let a = Layer::item(mine, "a");
        let b = Layer::item(theirs, "b");
        repo.save_all(&[a.clone(), b.clone()]).await.unwrap();

        let scoped = repo.filtered(&SceneFilter::new(None, Some(vec![mine])));
        assert_eq!(scoped.remove_all(&[a.id, b.id]).await.unwrap(), 1);
        assert_eq!(repo.find_by_ids(&[a.id, b.id]).await.unwrap(), vec![None, Some(b)]);
        assert_eq!(repo.find_by_scene(theirs).await.unwrap().len(), 1);
    }
}
