use crate::error::AppError;
use crate::id::{DatasetId, DatasetSchemaId, SceneId};
use crate::models::{Dataset, DatasetSchema};
use crate::repositories::collection::Collection;
use crate::repositories::scope::SceneFilter;
use crate::store::{Filter, Store, SCENE_FIELD};

#[derive(Clone)]
pub struct DatasetRepository {
    datasets: Collection<Dataset>,
    filter: SceneFilter,
}

impl DatasetRepository {
    pub fn new(store: Store) -> Self {
        Self {
            datasets: Collection::new(store),
            filter: SceneFilter::default(),
        }
    }

    pub fn filtered(&self, filter: &SceneFilter) -> Self {
        Self {
            datasets: self.datasets.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: DatasetId) -> Result<Dataset, AppError> {
        self.datasets.get(self.filter.read(Filter::id(id)), id).await
    }

    pub async fn find_by_ids(&self, ids: &[DatasetId]) -> Result<Vec<Option<Dataset>>, AppError> {
        self.datasets.find_by_ids(ids, self.filter.read(Filter::All)).await
    }

    pub async fn find_by_schema(&self, schema: DatasetSchemaId) -> Result<Vec<Dataset>, AppError> {
        self.datasets
            .find(self.filter.read(Filter::eq("schema", schema)))
            .await
    }

    pub async fn save(&self, dataset: &Dataset) -> Result<(), AppError> {
        if !self.filter.can_write(dataset.scene) {
            return Err(AppError::OperationDenied);
        }
        self.datasets.save(dataset).await
    }

    pub async fn save_all(&self, datasets: &[Dataset]) -> Result<(), AppError> {
        if datasets.iter().any(|d| !self.filter.can_write(d.scene)) {
            return Err(AppError::OperationDenied);
        }
        self.datasets.save_all(datasets).await
    }

    pub async fn remove(&self, id: DatasetId) -> Result<(), AppError> {
        self.datasets
            .remove_one(self.filter.write(Filter::id(id)), id)
            .await
    }

    /// Deletes every dataset of the scene.
    pub async fn remove_by_scene(&self, scene: SceneId) -> Result<(), AppError> {
        if !self.filter.can_write(scene) {
            return Err(AppError::OperationDenied);
        }
        let removed = self.datasets.remove(Filter::eq(SCENE_FIELD, scene)).await?;
        tracing::debug!(%scene, removed, "Removed scene datasets");
        Ok(())
    }
}

#[derive(Clone)]
pub struct DatasetSchemaRepository {
    schemas: Collection<DatasetSchema>,
    filter: SceneFilter,
}

impl DatasetSchemaRepository {
    pub fn new(store: Store) -> Self {
        Self {
            schemas: Collection::new(store),
            filter: SceneFilter::default(),
        }
    }

    pub fn filtered(&self, filter: &SceneFilter) -> Self {
        Self {
            schemas: self.schemas.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: DatasetSchemaId) -> Result<DatasetSchema, AppError> {
        self.schemas.get(self.filter.read(Filter::id(id)), id).await
    }

    pub async fn find_by_ids(
        &self,
        ids: &[DatasetSchemaId],
    ) -> Result<Vec<Option<DatasetSchema>>, AppError> {
        self.schemas.find_by_ids(ids, self.filter.read(Filter::All)).await
    }

    pub async fn find_by_scene(&self, scene: SceneId) -> Result<Vec<DatasetSchema>, AppError> {
        if !self.filter.can_read(scene) {
            return Ok(Vec::new());
        }
        self.schemas.find(Filter::eq(SCENE_FIELD, scene)).await
    }

    /// Schemas imported into the scene from `source`.
    pub async fn find_by_scene_and_source(
        &self,
        scene: SceneId,
        source: &str,
    ) -> Result<Vec<DatasetSchema>, AppError> {
        if !self.filter.can_read(scene) {
            return Ok(Vec::new());
        }
        self.schemas
            .find(Filter::eq(SCENE_FIELD, scene).and(Filter::eq("source", source)))
            .await
    }

    pub async fn save(&self, schema: &DatasetSchema) -> Result<(), AppError> {
        if !self.filter.can_write(schema.scene) {
            return Err(AppError::OperationDenied);
        }
        self.schemas.save(schema).await
    }

    pub async fn remove(&self, id: DatasetSchemaId) -> Result<(), AppError> {
        self.schemas
            .remove_one(self.filter.write(Filter::id(id)), id)
            .await
    }
}
