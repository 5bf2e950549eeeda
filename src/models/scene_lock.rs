use serde::{Deserialize, Serialize};

use crate::id::SceneId;

/// What a scene is currently busy with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneLockMode {
    #[default]
    Free,
    Pending,
    DatasetSyncing,
    PluginUpgrading,
}

impl SceneLockMode {
    /// Whether editing the scene is allowed.
    pub fn is_free(&self) -> bool {
        matches!(self, SceneLockMode::Free)
    }
}

/// Lock state of one scene, stored under the scene id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneLock {
    #[serde(rename = "id")]
    pub scene: SceneId,
    #[serde(rename = "lock")]
    pub mode: SceneLockMode,
}

impl super::Entity for SceneLock {
    type Id = SceneId;
    const COLLECTION: &'static str = "sceneLock";
    const KIND: &'static str = "SceneLock";

    fn id(&self) -> SceneId {
        self.scene
    }
}
