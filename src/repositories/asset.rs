use crate::error::AppError;
use crate::id::{AssetId, WorkspaceId};
use crate::models::Asset;
use crate::repositories::collection::Collection;
use crate::repositories::pagination::{PageInfo, Pagination};
use crate::repositories::scope::WorkspaceFilter;
use crate::store::{Filter, Store, WORKSPACE_FIELD};

/// Repository for uploaded assets.
#[derive(Clone)]
pub struct AssetRepository {
    assets: Collection<Asset>,
    filter: WorkspaceFilter,
}

impl AssetRepository {
    pub fn new(store: Store) -> Self {
        Self {
            assets: Collection::new(store),
            filter: WorkspaceFilter::default(),
        }
    }

    /// Returns a copy additionally scoped to `filter`.
    pub fn filtered(&self, filter: &WorkspaceFilter) -> Self {
        Self {
            assets: self.assets.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: AssetId) -> Result<Asset, AppError> {
        self.assets.get(self.filter.read(Filter::id(id)), id).await
    }

    pub async fn find_by_ids(&self, ids: &[AssetId]) -> Result<Vec<Option<Asset>>, AppError> {
        self.assets.find_by_ids(ids, self.filter.read(Filter::All)).await
    }

    /// One page of the workspace's assets. An unreadable workspace yields an
    /// empty page rather than an error.
    pub async fn find_by_workspace(
        &self,
        workspace: WorkspaceId,
        pagination: Pagination,
    ) -> Result<(Vec<Asset>, PageInfo), AppError> {
        if !self.filter.can_read(workspace) {
            return Ok((Vec::new(), PageInfo::empty()));
        }
        self.assets
            .paginate(Filter::eq(WORKSPACE_FIELD, workspace), pagination)
            .await
    }

    pub async fn save(&self, asset: &Asset) -> Result<(), AppError> {
        if !self.filter.can_write(asset.workspace) {
            return Err(AppError::OperationDenied);
        }
        self.assets.save(asset).await
    }

    pub async fn remove(&self, id: AssetId) -> Result<(), AppError> {
        self.assets
            .remove_one(self.filter.write(Filter::id(id)), id)
            .await
    }
}
