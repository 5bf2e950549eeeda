use crate::error::AppError;
use crate::id::{to_values, PropertyId, PropertySchemaId, SceneId};
use crate::models::{Property, PropertySchema};
use crate::repositories::collection::Collection;
use crate::repositories::scope::SceneFilter;
use crate::store::{Filter, Store, SCENE_FIELD};

#[derive(Clone)]
pub struct PropertyRepository {
    properties: Collection<Property>,
    filter: SceneFilter,
}

impl PropertyRepository {
    pub fn new(store: Store) -> Self {
        Self {
            properties: Collection::new(store),
            filter: SceneFilter::default(),
        }
    }

    pub fn filtered(&self, filter: &SceneFilter) -> Self {
        Self {
            properties: self.properties.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: PropertyId) -> Result<Property, AppError> {
        self.properties.get(self.filter.read(Filter::id(id)), id).await
    }

    pub async fn find_by_ids(&self, ids: &[PropertyId]) -> Result<Vec<Option<Property>>, AppError> {
        self.properties
            .find_by_ids(ids, self.filter.read(Filter::All))
            .await
    }

    /// Properties of the scene shaped by any of `schemas`.
    pub async fn find_by_schema(
        &self,
        schemas: &[PropertySchemaId],
        scene: SceneId,
    ) -> Result<Vec<Property>, AppError> {
        if schemas.is_empty() || !self.filter.can_read(scene) {
            return Ok(Vec::new());
        }
        self.properties
            .find(
                Filter::eq(SCENE_FIELD, scene)
                    .and(Filter::is_in("schema", to_values(schemas))),
            )
            .await
    }

    pub async fn find_by_scene(&self, scene: SceneId) -> Result<Vec<Property>, AppError> {
        if !self.filter.can_read(scene) {
            return Ok(Vec::new());
        }
        self.properties.find(Filter::eq(SCENE_FIELD, scene)).await
    }

    pub async fn save(&self, property: &Property) -> Result<(), AppError> {
        if !self.filter.can_write(property.scene) {
            return Err(AppError::OperationDenied);
        }
        self.properties.save(property).await
    }

    pub async fn save_all(&self, properties: &[Property]) -> Result<(), AppError> {
        if properties.iter().any(|p| !self.filter.can_write(p.scene)) {
            return Err(AppError::OperationDenied);
        }
        self.properties.save_all(properties).await
    }

    pub async fn remove(&self, id: PropertyId) -> Result<(), AppError> {
        self.properties
            .remove_one(self.filter.write(Filter::id(id)), id)
            .await
    }
}

/// Property schemas. Schemas without a scene belong to system plugins and are
/// visible through every scope.
#[derive(Clone)]
pub struct PropertySchemaRepository {
    schemas: Collection<PropertySchema>,
    filter: SceneFilter,
}

impl PropertySchemaRepository {
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

    pub async fn find_by_id(&self, id: PropertySchemaId) -> Result<PropertySchema, AppError> {
        self.schemas
            .get(self.filter.read_optional(Filter::id(id)), id)
            .await
    }

    pub async fn find_by_ids(
        &self,
        ids: &[PropertySchemaId],
    ) -> Result<Vec<Option<PropertySchema>>, AppError> {
        self.schemas
            .find_by_ids(ids, self.filter.read_optional(Filter::All))
            .await
    }

    pub async fn save(&self, schema: &PropertySchema) -> Result<(), AppError> {
        if !self.filter.can_write_optional(schema.scene) {
            return Err(AppError::OperationDenied);
        }
        self.schemas.save(schema).await
    }

    pub async fn save_all(&self, schemas: &[PropertySchema]) -> Result<(), AppError> {
        if schemas.iter().any(|s| !self.filter.can_write_optional(s.scene)) {
            return Err(AppError::OperationDenied);
        }
        self.schemas.save_all(schemas).await
    }

    pub async fn remove(&self, id: PropertySchemaId) -> Result<(), AppError> {
        self.schemas
            .remove_one(self.filter.write_optional(Filter::id(id)), id)
            .await
    }
}
