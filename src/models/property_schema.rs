use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::id::{PropertySchemaId, SceneId};

/// Layout of a [`Property`](super::Property). Schemas shipped by system
/// plugins have no scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub id: PropertySchemaId,
    pub scene: Option<SceneId>,
    #[serde(default)]
    pub groups: Vec<PropertySchemaGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchemaGroup {
    pub id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub fields: Vec<PropertySchemaField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchemaField {
    pub id: String,
    pub value_type: String,
    pub title: Option<String>,
    pub default_value: Option<JsonValue>,
}

super::entity!(PropertySchema, PropertySchemaId, "propertySchema", "PropertySchema");

impl super::SceneOwned for PropertySchema {
    fn scene(&self) -> Option<SceneId> {
        self.scene
    }
}
