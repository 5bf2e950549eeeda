use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::id::{DatasetId, DatasetSchemaId, PropertyId, PropertyItemId, PropertySchemaId, SceneId};

/// Values configured for a layer, widget or plugin, shaped by a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub scene: SceneId,
    pub schema: PropertySchemaId,
    #[serde(default)]
    pub items: Vec<PropertyItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropertyItem {
    Group(PropertyGroup),
    #[serde(rename = "grouplist")]
    GroupList(PropertyGroupList),
}

impl PropertyItem {
    pub fn id(&self) -> PropertyItemId {
        match self {
            PropertyItem::Group(g) => g.id,
            PropertyItem::GroupList(l) => l.id,
        }
    }

    pub fn schema_group(&self) -> &str {
        match self {
            PropertyItem::Group(g) => &g.schema_group,
            PropertyItem::GroupList(l) => &l.schema_group,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub id: PropertyItemId,
    pub schema_group: String,
    #[serde(default)]
    pub fields: Vec<PropertyField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroupList {
    pub id: PropertyItemId,
    pub schema_group: String,
    #[serde(default)]
    pub groups: Vec<PropertyGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyField {
    /// Schema field id, unique within its group.
    pub field: String,
    pub value_type: String,
    pub value: Option<JsonValue>,
    #[serde(default)]
    pub links: Vec<PropertyLink>,
}

/// A reference from a property field to a dataset field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyLink {
    pub dataset: Option<DatasetId>,
    pub schema: DatasetSchemaId,
    pub field: String,
}

impl Property {
    pub fn new(scene: SceneId, schema: PropertySchemaId) -> Self {
        Self {
            id: PropertyId::new(),
            scene,
            schema,
            items: Vec::new(),
        }
    }
}

super::entity!(Property, PropertyId, "property", "Property");

impl super::SceneOwned for Property {
    fn scene(&self) -> Option<SceneId> {
        Some(self.scene)
    }
}
