use crate::error::AppError;
use crate::id::{ProjectId, WorkspaceId};
use crate::models::{Entity, Project};
use crate::repositories::collection::Collection;
use crate::repositories::pagination::{PageInfo, Pagination};
use crate::repositories::scope::WorkspaceFilter;
use crate::store::{Filter, Store, WORKSPACE_FIELD};

#[derive(Clone)]
pub struct ProjectRepository {
    projects: Collection<Project>,
    filter: WorkspaceFilter,
}

impl ProjectRepository {
    pub fn new(store: Store) -> Self {
        Self {
            projects: Collection::new(store),
            filter: WorkspaceFilter::default(),
        }
    }

    pub fn filtered(&self, filter: &WorkspaceFilter) -> Self {
        Self {
            projects: self.projects.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: ProjectId) -> Result<Project, AppError> {
        self.projects.get(self.filter.read(Filter::id(id)), id).await
    }

    pub async fn find_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Option<Project>>, AppError> {
        self.projects.find_by_ids(ids, self.filter.read(Filter::All)).await
    }

    pub async fn find_by_workspace(
        &self,
        workspace: WorkspaceId,
        pagination: Pagination,
    ) -> Result<(Vec<Project>, PageInfo), AppError> {
        if !self.filter.can_read(workspace) {
            return Ok((Vec::new(), PageInfo::empty()));
        }
        self.projects
            .paginate(Filter::eq(WORKSPACE_FIELD, workspace), pagination)
            .await
    }

    /// Finds a published project by its public alias. Empty aliases never match.
    pub async fn find_by_alias(&self, alias: &str) -> Result<Project, AppError> {
        if alias.is_empty() {
            return Err(AppError::not_found(Project::KIND, alias));
        }
        self.projects
            .get(self.filter.read(Filter::eq("alias", alias)), alias)
            .await
    }

    pub async fn count_by_workspace(&self, workspace: WorkspaceId) -> Result<u64, AppError> {
        if !self.filter.can_read(workspace) {
            return Err(AppError::OperationDenied);
        }
        self.projects
            .count(Filter::eq(WORKSPACE_FIELD, workspace))
            .await
    }

    pub async fn save(&self, project: &Project) -> Result<(), AppError> {
        if !self.filter.can_write(project.workspace) {
            return Err(AppError::OperationDenied);
        }
        self.projects.save(project).await
    }

    pub async fn remove(&self, id: ProjectId) -> Result<(), AppError> {
        self.projects
            .remove_one(self.filter.write(Filter::id(id)), id)
            .await
    }
}
