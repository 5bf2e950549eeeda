use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{LayerId, PluginId, ProjectId, PropertyId, SceneId, WidgetId, WorkspaceId};

/// The editable content of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub project: ProjectId,
    #[serde(rename = "team")]
    pub workspace: WorkspaceId,
    pub root_layer: LayerId,
    pub property: PropertyId,
    #[serde(default)]
    pub widgets: Vec<SceneWidget>,
    #[serde(default)]
    pub plugins: Vec<ScenePlugin>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneWidget {
    pub id: WidgetId,
    pub plugin: PluginId,
    pub extension: String,
    pub property: PropertyId,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub extended: bool,
}

/// A plugin installed into the scene, with its scene-level property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlugin {
    pub plugin: PluginId,
    pub property: Option<PropertyId>,
}

impl Scene {
    pub fn new(
        project: ProjectId,
        workspace: WorkspaceId,
        root_layer: LayerId,
        property: PropertyId,
    ) -> Self {
        Self {
            id: SceneId::new(),
            project,
            workspace,
            root_layer,
            property,
            widgets: Vec::new(),
            plugins: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

super::entity!(Scene, SceneId, "scene", "Scene");

impl super::WorkspaceOwned for Scene {
    fn workspace(&self) -> WorkspaceId {
        self.workspace
    }
}
