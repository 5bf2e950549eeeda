use crate::error::AppError;
use crate::id::{to_values, ProjectId, SceneId, WorkspaceId};
use crate::models::Scene;
use crate::repositories::collection::Collection;
use crate::repositories::scope::WorkspaceFilter;
use crate::store::{Filter, Store, WORKSPACE_FIELD};

#[derive(Clone)]
pub struct SceneRepository {
    scenes: Collection<Scene>,
    filter: WorkspaceFilter,
}

impl SceneRepository {
    pub fn new(store: Store) -> Self {
        Self {
            scenes: Collection::new(store),
            filter: WorkspaceFilter::default(),
        }
    }

    pub fn filtered(&self, filter: &WorkspaceFilter) -> Self {
        Self {
            scenes: self.scenes.clone(),
            filter: self.filter.merge(filter),
        }
    }

    pub async fn find_by_id(&self, id: SceneId) -> Result<Scene, AppError> {
        self.scenes.get(self.filter.read(Filter::id(id)), id).await
    }

    pub async fn find_by_ids(&self, ids: &[SceneId]) -> Result<Vec<Option<Scene>>, AppError> {
        self.scenes.find_by_ids(ids, self.filter.read(Filter::All)).await
    }

    /// The scene of a project. Every project has at most one.
    pub async fn find_by_project(&self, project: ProjectId) -> Result<Scene, AppError> {
        self.scenes
            .get(self.filter.read(Filter::eq("project", project)), project)
            .await
    }

    /// Scenes of the readable workspaces among `workspaces`.
    pub async fn find_by_workspace(&self, workspaces: &[WorkspaceId]) -> Result<Vec<Scene>, AppError> {
        let readable: Vec<WorkspaceId> = workspaces
            .iter()
            .copied()
            .filter(|ws| self.filter.can_read(*ws))
            .collect();
        if readable.is_empty() {
            return Ok(Vec::new());
        }
        self.scenes
            .find(Filter::is_in(WORKSPACE_FIELD, to_values(&readable)))
            .await
    }

    pub async fn save(&self, scene: &Scene) -> Result<(), AppError> {
        if !self.filter.can_write(scene.workspace) {
            return Err(AppError::OperationDenied);
        }
        self.scenes.save(scene).await
    }

    pub async fn remove(&self, id: SceneId) -> Result<(), AppError> {
        self.scenes
            .remove_one(self.filter.write(Filter::id(id)), id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{LayerId, PropertyId};
    use crate::store::backends::memory::MemoryClient;
    use std::sync::Arc;

    fn scene(project: ProjectId, ws: WorkspaceId) -> Scene {
        Scene::new(project, ws, LayerId::new(), PropertyId::new())
    }

    #[tokio::test]
    async fn test_find_by_project() {
        let repo = SceneRepository::new(Arc::new(MemoryClient::new()));
        let project = ProjectId::new();
        let s = scene(project, WorkspaceId::new());
        repo.save(&s).await.unwrap();

        assert_eq!(repo.find_by_project(project).await.unwrap(), s);
        assert!(repo
            .find_by_project(ProjectId::new())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_workspace_skips_unreadable() {
        let repo = SceneRepository::new(Arc::new(MemoryClient::new()));
        let (a, b) = (WorkspaceId::new(), WorkspaceId::new());
        repo.save(&scene(ProjectId::new(), a)).await.unwrap();
        repo.save(&scene(ProjectId::new(), b)).await.unwrap();

        assert_eq!(repo.find_by_workspace(&[a, b]).await.unwrap().len(), 2);

        let scoped = repo.filtered(&WorkspaceFilter::new(Some(vec![a]), None));
        let found = scoped.find_by_workspace(&[a, b]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].workspace, a);
    }
}
