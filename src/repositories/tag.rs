use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::id::{SceneId, TagId};
use crate::models::Tag;
use crate::repositories::collection::Collection;
use crate::repositories::scope::SceneFilter;
use crate::store::{Filter, Store, SCENE_FIELD};

#[derive(Clone)]
pub struct TagRepository {
    tags: Collection<Tag>,
    filter: SceneFilter,
}

impl TagRepository {
    pub fn new(store: Store) -> Self {
        Self {
            tags: Collection::new(store),
            filter: SceneFilter::default(),
        }
    }

    pub fn filtered(&self, filter: &SceneFilter) -> Self {
        Self {
            tags: self.tags.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: TagId) -> Result<Tag, AppError> {
        self.tags.get(self.filter.read(Filter::id(id)), id).await
    }

    pub async fn find_by_ids(&self, ids: &[TagId]) -> Result<Vec<Option<Tag>>, AppError> {
        self.tags.find_by_ids(ids, self.filter.read(Filter::All)).await
    }

    pub async fn find_by_scene(&self, scene: SceneId) -> Result<Vec<Tag>, AppError> {
        if !self.filter.can_read(scene) {
            return Ok(Vec::new());
        }
        self.tags.find(Filter::eq(SCENE_FIELD, scene)).await
    }

    /// Top-level tags of the scene: every group plus the items without a parent.
    pub async fn find_root_by_scene(&self, scene: SceneId) -> Result<Vec<Tag>, AppError> {
        if !self.filter.can_read(scene) {
            return Ok(Vec::new());
        }
        self.tags
            .find(Filter::eq(SCENE_FIELD, scene).and(Filter::eq("parent", JsonValue::Null)))
            .await
    }

    /// The group containing the item `id`.
    pub async fn find_group_by_item(&self, id: TagId) -> Result<Tag, AppError> {
        self.tags
            .get(self.filter.read(Filter::contains("tags", id)), id)
            .await
    }

    pub async fn save(&self, tag: &Tag) -> Result<(), AppError> {
        if !self.filter.can_write(tag.scene) {
            return Err(AppError::OperationDenied);
        }
        self.tags.save(tag).await
    }

    pub async fn save_all(&self, tags: &[Tag]) -> Result<(), AppError> {
        if tags.iter().any(|t| !self.filter.can_write(t.scene)) {
            return Err(AppError::OperationDenied);
        }
        self.tags.save_all(tags).await
    }

    pub async fn remove(&self, id: TagId) -> Result<(), AppError> {
        self.tags
            .remove_one(self.filter.write(Filter::id(id)), id)
            .await
    }

    pub async fn remove_all(&self, ids: &[TagId]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.tags.remove(self.filter.write(Filter::ids(ids))).await
    }
}
