use serde_json::Value as JsonValue;

use super::lookup::find_by;
use super::ID;
use crate::models;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub id: ID,
    pub source: String,
    pub schema_id: ID,
    pub fields: Vec<DatasetField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetField {
    pub field_id: ID,
    pub schema_id: ID,
    pub source: String,
    pub value_type: String,
    pub value: Option<JsonValue>,
}

impl Dataset {
    /// Field by schema field id.
    pub fn field(&self, id: &str) -> Option<&DatasetField> {
        find_by(&self.fields, id, |f| f.field_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSchema {
    pub id: ID,
    pub source: String,
    pub name: String,
    pub scene_id: ID,
    pub representative_field_id: Option<ID>,
    pub dynamic: bool,
    pub fields: Vec<DatasetSchemaField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSchemaField {
    pub id: ID,
    pub source: String,
    pub name: String,
    pub value_type: String,
    pub schema_id: ID,
    pub ref_id: Option<ID>,
}

impl DatasetSchema {
    pub fn field(&self, id: &str) -> Option<&DatasetSchemaField> {
        find_by(&self.fields, id, |f| f.id.as_str())
    }

    pub fn representative_field(&self) -> Option<&DatasetSchemaField> {
        self.representative_field_id
            .as_deref()
            .and_then(|id| self.field(id))
    }
}

impl From<&models::Dataset> for Dataset {
    fn from(d: &models::Dataset) -> Self {
        let schema_id = d.schema.to_string();
        Self {
            id: d.id.to_string(),
            source: d.source.clone(),
            fields: d
                .fields
                .iter()
                .map(|f| DatasetField {
                    field_id: f.field.clone(),
                    schema_id: schema_id.clone(),
                    source: f.source.clone(),
                    value_type: f.value_type.clone(),
                    value: f.value.clone(),
                })
                .collect(),
            schema_id,
        }
    }
}

impl From<&models::DatasetSchema> for DatasetSchema {
    fn from(s: &models::DatasetSchema) -> Self {
        let id = s.id.to_string();
        Self {
            source: s.source.clone(),
            name: s.name.clone(),
            scene_id: s.scene.to_string(),
            representative_field_id: s.representative_field.clone(),
            dynamic: s.dynamic,
            fields: s
                .fields
                .iter()
                .map(|f| DatasetSchemaField {
                    id: f.id.clone(),
                    source: f.source.clone(),
                    name: f.name.clone(),
                    value_type: f.value_type.clone(),
                    schema_id: id.clone(),
                    ref_id: f.reference.map(|r| r.to_string()),
                })
                .collect(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{DatasetId, DatasetSchemaId, SceneId};

    fn schema() -> models::DatasetSchema {
        models::DatasetSchema {
            id: DatasetSchemaId::new(),
            scene: SceneId::new(),
            name: "cities".into(),
            source: "file:///cities.csv".into(),
            representative_field: Some("name".into()),
            fields: vec![
                models::DatasetSchemaField {
                    id: "name".into(),
                    name: "Name".into(),
                    value_type: "string".into(),
                    reference: None,
                    source: String::new(),
                },
                models::DatasetSchemaField {
                    id: "pop".into(),
                    name: "Population".into(),
                    value_type: "number".into(),
                    reference: None,
                    source: String::new(),
                },
            ],
            dynamic: false,
        }
    }

    #[test]
    fn test_dataset_field_lookup() {
        let schema = schema();
        let dataset = Dataset::from(&models::Dataset {
            id: DatasetId::new(),
            scene: schema.scene,
            schema: schema.id,
            source: schema.source.clone(),
            fields: vec![models::DatasetField {
                field: "pop".into(),
                value_type: "number".into(),
                value: Some(serde_json::json!(1200)),
                source: String::new(),
            }],
        });

        assert_eq!(dataset.field("pop").unwrap().value, Some(serde_json::json!(1200)));
        assert_eq!(dataset.field("pop").unwrap().schema_id, schema.id.to_string());
        assert!(dataset.field("name").is_none());
        assert!(dataset.field("").is_none());
    }

    #[test]
    fn test_dataset_schema_field_lookup() {
        let schema = DatasetSchema::from(&schema());
        assert_eq!(schema.field("pop").unwrap().name, "Population");
        assert_eq!(schema.representative_field().unwrap().id, "name");
        assert!(schema.field("missing").is_none());
        assert!(schema.field("").is_none());

        let absent: Option<&DatasetSchema> = None;
        assert!(absent.and_then(|s| s.field("pop")).is_none());
    }
}
