use super::lookup::{find_by, find_by_opt};
use super::merged::MergedProperty;
use super::ID;
use crate::models;

#[derive(Debug, Clone, PartialEq)]
pub struct Infobox {
    pub scene_id: ID,
    pub layer_id: ID,
    pub property_id: ID,
    pub linked_dataset_id: Option<ID>,
    pub fields: Vec<InfoboxField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoboxField {
    pub id: ID,
    pub scene_id: ID,
    pub layer_id: ID,
    pub property_id: ID,
    pub plugin_id: ID,
    pub extension_id: ID,
    pub linked_dataset_id: Option<ID>,
}

impl Infobox {
    /// Builds the view of `layer`'s infobox.
    pub fn new(infobox: &models::Infobox, layer: &models::Layer) -> Self {
        let linked_dataset_id = match &layer.kind {
            models::LayerKind::Item { linked_dataset } => linked_dataset.map(|d| d.to_string()),
            models::LayerKind::Group { .. } => None,
        };
        let scene_id = layer.scene.to_string();
        let layer_id = layer.id.to_string();
        Self {
            property_id: infobox.property.to_string(),
            fields: infobox
                .fields
                .iter()
                .map(|f| InfoboxField {
                    id: f.id.to_string(),
                    scene_id: scene_id.clone(),
                    layer_id: layer_id.clone(),
                    property_id: f.property.to_string(),
                    plugin_id: f.plugin.to_string(),
                    extension_id: f.extension.clone(),
                    linked_dataset_id: linked_dataset_id.clone(),
                })
                .collect(),
            scene_id,
            layer_id,
            linked_dataset_id,
        }
    }

    pub fn field(&self, id: &str) -> Option<&InfoboxField> {
        find_by(&self.fields, id, |f| f.id.as_str())
    }
}

/// An infobox merged from a layer and the group it inherits from.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedInfobox {
    pub scene_id: ID,
    pub property: Option<MergedProperty>,
    pub fields: Vec<MergedInfoboxField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedInfoboxField {
    pub original_id: ID,
    pub scene_id: ID,
    pub plugin_id: ID,
    pub extension_id: ID,
    pub property: Option<MergedProperty>,
}

impl MergedInfobox {
    /// Field by the id of the infobox field it was merged from.
    pub fn field(&self, id: &str) -> Option<&MergedInfoboxField> {
        find_by_opt(&self.fields, id, |f| Some(f.original_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{InfoboxFieldId, PluginId, PropertyId, SceneId};

    #[test]
    fn test_infobox_field_lookup() {
        let mut layer = models::Layer::item(SceneId::new(), "poi");
        let field_id = InfoboxFieldId::new();
        layer.infobox = Some(models::Infobox {
            property: PropertyId::new(),
            fields: vec![models::InfoboxField {
                id: field_id,
                plugin: PluginId::new("builtin", None),
                extension: "textblock".into(),
                property: PropertyId::new(),
            }],
        });
        let infobox = Infobox::new(layer.infobox.as_ref().unwrap(), &layer);

        let field = infobox.field(&field_id.to_string()).unwrap();
        assert_eq!(field.extension_id, "textblock");
        assert_eq!(field.layer_id, layer.id.to_string());
        assert!(infobox.field("").is_none());
        assert!(infobox.field("other").is_none());
    }

    #[test]
    fn test_merged_infobox_field_matches_original_id() {
        let merged = MergedInfobox {
            scene_id: "s".into(),
            property: None,
            fields: vec![MergedInfoboxField {
                original_id: "f1".into(),
                scene_id: "s".into(),
                plugin_id: "builtin".into(),
                extension_id: "textblock".into(),
                property: None,
            }],
        };
        assert!(merged.field("f1").is_some());
        assert!(merged.field("f2").is_none());
        assert!(merged.field("").is_none());
    }
}
