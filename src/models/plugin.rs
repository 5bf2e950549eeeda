use serde::{Deserialize, Serialize};

use crate::id::{PluginId, PropertySchemaId, SceneId};

/// An installed plugin. System plugins have no scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub id: PluginId,
    pub name: String,
    pub author: Option<String>,
    pub scene: Option<SceneId>,
    #[serde(default)]
    pub extensions: Vec<PluginExtension>,
    /// Schema of the plugin-wide property.
    pub schema: Option<PropertySchemaId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginExtension {
    pub id: String,
    /// `primitive`, `widget`, `block`, `visualizer` or `infobox`.
    #[serde(rename = "type")]
    pub extension_type: String,
    pub name: String,
    pub schema: Option<PropertySchemaId>,
}

super::entity!(Plugin, PluginId, "plugin", "Plugin");

impl super::SceneOwned for Plugin {
    fn scene(&self) -> Option<SceneId> {
        self.scene
    }
}
