use crate::error::AppError;
use crate::id::{UserId, WorkspaceId};
use crate::models::Workspace;
use crate::repositories::collection::Collection;
use crate::store::{Filter, Store};

#[derive(Clone)]
pub struct WorkspaceRepository {
    workspaces: Collection<Workspace>,
}

impl WorkspaceRepository {
    pub fn new(store: Store) -> Self {
        Self {
            workspaces: Collection::new(store),
        }
    }

    pub async fn find_by_id(&self, id: WorkspaceId) -> Result<Workspace, AppError> {
        self.workspaces.get(Filter::id(id), id).await
    }

    pub async fn find_by_ids(&self, ids: &[WorkspaceId]) -> Result<Vec<Option<Workspace>>, AppError> {
        self.workspaces.find_by_ids(ids, Filter::All).await
    }

    /// Workspaces the user is a member of, in any role.
    pub async fn find_by_user(&self, user: UserId) -> Result<Vec<Workspace>, AppError> {
        self.workspaces
            .find(Filter::exists(&format!("members.{}", user)))
            .await
    }

    pub async fn save(&self, workspace: &Workspace) -> Result<(), AppError> {
        self.workspaces.save(workspace).await
    }

    pub async fn save_all(&self, workspaces: &[Workspace]) -> Result<(), AppError> {
        self.workspaces.save_all(workspaces).await
    }

    pub async fn remove(&self, id: WorkspaceId) -> Result<(), AppError> {
        self.workspaces.remove_one(Filter::id(id), id).await
    }

    pub async fn remove_all(&self, ids: &[WorkspaceId]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.workspaces.remove(Filter::ids(ids)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Role};
    use crate::store::backends::memory::MemoryClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_by_user() {
        let repo = WorkspaceRepository::new(Arc::new(MemoryClient::new()));
        let (owner, guest) = (UserId::new(), UserId::new());

        let personal = Workspace::new("personal", owner);
        let mut shared = Workspace::new("shared", UserId::new());
        shared.members.insert(
            owner,
            Member {
                role: Role::Writer,
                invited_by: None,
            },
        );
        repo.save_all(&[personal.clone(), shared.clone()]).await.unwrap();

        assert_eq!(repo.find_by_user(owner).await.unwrap().len(), 2);
        assert!(repo.find_by_user(guest).await.unwrap().is_empty());

        assert_eq!(repo.remove_all(&[personal.id, shared.id]).await.unwrap(), 2);
        assert_eq!(repo.find_by_ids(&[personal.id]).await.unwrap(), vec![None]);
    }
}
