use serde::{Deserialize, Serialize};

use crate::id::{
    DatasetId, DatasetSchemaId, InfoboxFieldId, LayerId, PluginId, PropertyId, SceneId, TagId,
};

/// A node of a scene's layer tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub scene: SceneId,
    pub name: String,
    #[serde(default = "visible_default")]
    pub visible: bool,
    pub plugin: Option<PluginId>,
    pub extension: Option<String>,
    pub property: Option<PropertyId>,
    pub infobox: Option<Infobox>,
    #[serde(default)]
    pub tags: Vec<TagId>,
    #[serde(flatten)]
    pub kind: LayerKind,
}

fn visible_default() -> bool {
    true
}

/// Leaf or group. Stored as a `type` discriminator next to the common fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerKind {
    Item {
        linked_dataset: Option<DatasetId>,
    },
    Group {
        /// Child layer ids in display order.
        #[serde(default)]
        layers: Vec<LayerId>,
        linked_dataset_schema: Option<DatasetSchemaId>,
        /// The scene's root layer.
        #[serde(default)]
        root: bool,
    },
}

impl Layer {
    pub fn item(scene: SceneId, name: &str) -> Self {
        Self::with_kind(scene, name, LayerKind::Item { linked_dataset: None })
    }

    pub fn group(scene: SceneId, name: &str, layers: Vec<LayerId>) -> Self {
        Self::with_kind(
            scene,
            name,
            LayerKind::Group {
                layers,
                linked_dataset_schema: None,
                root: false,
            },
        )
    }

    fn with_kind(scene: SceneId, name: &str, kind: LayerKind) -> Self {
        Self {
            id: LayerId::new(),
            scene,
            name: name.to_string(),
            visible: true,
            plugin: None,
            extension: None,
            property: None,
            infobox: None,
            tags: Vec::new(),
            kind,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, LayerKind::Group { .. })
    }

    /// Child ids of a group; empty for items.
    pub fn children(&self) -> &[LayerId] {
        match &self.kind {
            LayerKind::Group { layers, .. } => layers,
            LayerKind::Item { .. } => &[],
        }
    }

    /// Every property referenced by the layer and its infobox.
    pub fn properties(&self) -> Vec<PropertyId> {
        let mut ids: Vec<PropertyId> = self.property.into_iter().collect();
        if let Some(infobox) = &self.infobox {
            ids.push(infobox.property);
            ids.extend(infobox.fields.iter().map(|f| f.property));
        }
        ids
    }
}

/// Popup shown when a feature of the layer is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infobox {
    pub property: PropertyId,
    #[serde(default)]
    pub fields: Vec<InfoboxField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoboxField {
    pub id: InfoboxFieldId,
    pub plugin: PluginId,
    pub extension: String,
    pub property: PropertyId,
}

super::entity!(Layer, LayerId, "layer", "Layer");

impl super::SceneOwned for Layer {
    fn scene(&self) -> Option<SceneId> {
        Some(self.scene)
    }
}
