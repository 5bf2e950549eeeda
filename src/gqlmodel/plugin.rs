use super::lookup::find_by;
use super::ID;
use crate::models;

#[derive(Debug, Clone, PartialEq)]
pub struct Plugin {
    pub id: ID,
    pub scene_id: Option<ID>,
    pub name: String,
    pub version: String,
    pub author: Option<String>,
    pub property_schema_id: Option<ID>,
    pub extensions: Vec<PluginExtension>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluginExtension {
    pub extension_id: ID,
    pub plugin_id: ID,
    pub extension_type: String,
    pub name: String,
    pub property_schema_id: Option<ID>,
}

impl Plugin {
    pub fn extension(&self, id: &str) -> Option<&PluginExtension> {
        find_by(&self.extensions, id, |e| e.extension_id.as_str())
    }
}

impl From<&models::Plugin> for Plugin {
    fn from(p: &models::Plugin) -> Self {
        let id = p.id.to_string();
        Self {
            scene_id: p.scene.map(|s| s.to_string()),
            name: p.name.clone(),
            version: p.id.version().unwrap_or_default().to_string(),
            author: p.author.clone(),
            property_schema_id: p.schema.map(|s| s.to_string()),
            extensions: p
                .extensions
                .iter()
                .map(|e| PluginExtension {
                    extension_id: e.id.clone(),
                    plugin_id: id.clone(),
                    extension_type: e.extension_type.clone(),
                    name: e.name.clone(),
                    property_schema_id: e.schema.map(|s| s.to_string()),
                })
                .collect(),
            id,
        }
    }
}
