use chrono::{DateTime, Utc};

use super::ID;
use crate::models;

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: ID,
    pub project_id: ID,
    pub team_id: ID,
    pub property_id: ID,
    pub root_layer_id: ID,
    pub widgets: Vec<SceneWidget>,
    pub plugins: Vec<ScenePlugin>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneWidget {
    pub id: ID,
    pub plugin_id: ID,
    pub extension_id: ID,
    pub property_id: ID,
    pub enabled: bool,
    pub extended: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenePlugin {
    pub plugin_id: ID,
    pub property_id: Option<ID>,
}

impl Scene {
    /// Widget by plugin and extension. Ids are compared as given, empty
    /// ones included.
    pub fn widget(&self, plugin_id: &str, extension_id: &str) -> Option<&SceneWidget> {
        self.widgets
            .iter()
            .find(|w| w.plugin_id == plugin_id && w.extension_id == extension_id)
    }

    /// Installed plugin by id. Ids are compared as given, empty ones included.
    pub fn plugin(&self, plugin_id: &str) -> Option<&ScenePlugin> {
        self.plugins.iter().find(|p| p.plugin_id == plugin_id)
    }
}

impl From<&models::Scene> for Scene {
    fn from(s: &models::Scene) -> Self {
        Self {
            id: s.id.to_string(),
            project_id: s.project.to_string(),
            team_id: s.workspace.to_string(),
            property_id: s.property.to_string(),
            root_layer_id: s.root_layer.to_string(),
            widgets: s
                .widgets
                .iter()
                .map(|w| SceneWidget {
                    id: w.id.to_string(),
                    plugin_id: w.plugin.to_string(),
                    extension_id: w.extension.clone(),
                    property_id: w.property.to_string(),
                    enabled: w.enabled,
                    extended: w.extended,
                })
                .collect(),
            plugins: s
                .plugins
                .iter()
                .map(|p| ScenePlugin {
                    plugin_id: p.plugin.to_string(),
                    property_id: p.property.map(|id| id.to_string()),
                })
                .collect(),
            updated_at: s.updated_at,
        }
    }
}
