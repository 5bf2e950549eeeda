//! Per-scene busy state.

use crate::error::AppError;
use crate::id::SceneId;
use crate::models::{SceneLock, SceneLockMode};
use crate::repositories::collection::Collection;
use crate::store::{Filter, Store};

#[derive(Clone)]
pub struct SceneLockRepository {
    locks: Collection<SceneLock>,
}

impl SceneLockRepository {
    pub fn new(store: Store) -> Self {
        Self {
            locks: Collection::new(store),
        }
    }

    /// Current mode of `scene`; scenes without a record are free.
    pub async fn get_lock(&self, scene: SceneId) -> Result<SceneLockMode, AppError> {
        Ok(self
            .locks
            .find_one(Filter::id(scene))
            .await?
            .map(|l| l.mode)
            .unwrap_or_default())
    }

    /// Modes of `scenes`, aligned with the input.
    pub async fn get_all_locks(&self, scenes: &[SceneId]) -> Result<Vec<SceneLockMode>, AppError> {
        Ok(self
            .locks
            .find_by_ids(scenes, Filter::All)
            .await?
            .into_iter()
            .map(|l| l.map(|l| l.mode).unwrap_or_default())
            .collect())
    }

    pub async fn save_lock(&self, scene: SceneId, mode: SceneLockMode) -> Result<(), AppError> {
        self.locks.save(&SceneLock { scene, mode }).await
    }

    /// Frees every scene.
    pub async fn release_all_locks(&self) -> Result<(), AppError> {
        let released = self.locks.remove(Filter::All).await?;
        tracing::info!(released, "Released scene locks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backends::memory::MemoryClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_scene_locks() {
        let repo = SceneLockRepository::new(Arc::new(MemoryClient::new()));
        let a = SceneId::new();
        let b = SceneId::new();

        assert_eq!(repo.get_lock(a).await.unwrap(), SceneLockMode::Free);
        repo.save_lock(a, SceneLockMode::DatasetSyncing).await.unwrap();
        assert_eq!(repo.get_lock(a).await.unwrap(), SceneLockMode::DatasetSyncing);

        let all = repo.get_all_locks(&[b, a]).await.unwrap();
        assert_eq!(all, vec![SceneLockMode::Free, SceneLockMode::DatasetSyncing]);

        repo.release_all_locks().await.unwrap();
        assert!(repo.get_lock(a).await.unwrap().is_free());
    }
}
