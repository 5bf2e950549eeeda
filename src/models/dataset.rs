use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::id::{DatasetId, DatasetSchemaId, SceneId};

/// A row of imported data, shaped by a [`DatasetSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub scene: SceneId,
    pub schema: DatasetSchemaId,
    pub source: String,
    #[serde(default)]
    pub fields: Vec<DatasetField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetField {
    /// Id of the schema field this value belongs to.
    pub field: String,
    pub value_type: String,
    pub value: Option<JsonValue>,
    #[serde(default)]
    pub source: String,
}

/// Column layout of a set of datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub id: DatasetSchemaId,
    pub scene: SceneId,
    pub name: String,
    pub source: String,
    pub representative_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<DatasetSchemaField>,
    /// Created by the user rather than imported.
    #[serde(default)]
    pub dynamic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchemaField {
    pub id: String,
    pub name: String,
    pub value_type: String,
    /// Schema referenced by a field of reference type.
    pub reference: Option<DatasetSchemaId>,
    #[serde(default)]
    pub source: String,
}

super::entity!(Dataset, DatasetId, "dataset", "Dataset");
super::entity!(DatasetSchema, DatasetSchemaId, "datasetSchema", "DatasetSchema");

impl super::SceneOwned for Dataset {
    fn scene(&self) -> Option<SceneId> {
        Some(self.scene)
    }
}

impl super::SceneOwned for DatasetSchema {
    fn scene(&self) -> Option<SceneId> {
        Some(self.scene)
    }
}
