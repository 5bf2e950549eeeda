use super::infobox::Infobox;
use super::{Node, ID};
use crate::models;

/// A layer view: a leaf item or a group.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Item(LayerItem),
    Group(LayerGroup),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerItem {
    pub id: ID,
    pub scene_id: ID,
    pub name: String,
    pub is_visible: bool,
    pub property_id: Option<ID>,
    pub plugin_id: Option<ID>,
    pub extension_id: Option<ID>,
    pub infobox: Option<Infobox>,
    /// Group this layer is displayed under. Set by [`attach_parent_layer`].
    pub parent_id: Option<ID>,
    pub linked_dataset_id: Option<ID>,
    pub tag_ids: Vec<ID>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerGroup {
    pub id: ID,
    pub scene_id: ID,
    pub name: String,
    pub is_visible: bool,
    pub property_id: Option<ID>,
    pub plugin_id: Option<ID>,
    pub extension_id: Option<ID>,
    pub infobox: Option<Infobox>,
    pub parent_id: Option<ID>,
    pub linked_dataset_schema_id: Option<ID>,
    pub root: bool,
    pub tag_ids: Vec<ID>,
    pub layer_ids: Vec<ID>,
    /// Children resolved from `layer_ids`, aligned with it. Missing layers
    /// stay `None`. Empty until [`LayerGroup::resolve_children`].
    pub layers: Vec<Option<Layer>>,
}

impl Layer {
    pub fn id(&self) -> &str {
        match self {
            Layer::Item(l) => &l.id,
            Layer::Group(l) => &l.id,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Layer::Item(l) => l.parent_id.as_deref(),
            Layer::Group(l) => l.parent_id.as_deref(),
        }
    }

    fn set_parent(&mut self, parent: &str) {
        let slot = match self {
            Layer::Item(l) => &mut l.parent_id,
            Layer::Group(l) => &mut l.parent_id,
        };
        *slot = Some(parent.to_string());
    }
}

impl Node for LayerItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Node for LayerGroup {
    fn id(&self) -> &str {
        &self.id
    }
}

impl LayerGroup {
    /// Stores resolved children, pointing each one back at this group.
    pub fn resolve_children(&mut self, children: Vec<Option<Layer>>) {
        self.layers = attach_parent_layer(children, &self.id);
    }

    /// Depth-first search through the resolved children.
    pub fn find_layer(&self, id: &str) -> Option<&Layer> {
        if id.is_empty() {
            return None;
        }
        self.layers.iter().flatten().find_map(|layer| {
            if layer.id() == id {
                return Some(layer);
            }
            match layer {
                Layer::Group(group) => group.find_layer(id),
                Layer::Item(_) => None,
            }
        })
    }
}

/// Sets `parent_id` on every layer. The output has the same length and
/// order as the input, with `None` entries kept as `None`.
pub fn attach_parent_layer(
    layers: impl IntoIterator<Item = Option<Layer>>,
    parent: &str,
) -> Vec<Option<Layer>> {
    layers
        .into_iter()
        .map(|layer| {
            layer.map(|mut l| {
                l.set_parent(parent);
                l
            })
        })
        .collect()
}

impl From<&models::Layer> for Layer {
    fn from(l: &models::Layer) -> Self {
        let infobox = l.infobox.as_ref().map(|i| Infobox::new(i, l));
        let tag_ids = l.tags.iter().map(ToString::to_string).collect();
        match &l.kind {
            models::LayerKind::Item { linked_dataset } => Layer::Item(LayerItem {
                id: l.id.to_string(),
                scene_id: l.scene.to_string(),
                name: l.name.clone(),
                is_visible: l.visible,
                property_id: l.property.map(|p| p.to_string()),
                plugin_id: l.plugin.as_ref().map(ToString::to_string),
                extension_id: l.extension.clone(),
                infobox,
                parent_id: None,
                linked_dataset_id: linked_dataset.map(|d| d.to_string()),
                tag_ids,
            }),
            models::LayerKind::Group {
                layers,
                linked_dataset_schema,
                root,
            } => Layer::Group(LayerGroup {
                id: l.id.to_string(),
                scene_id: l.scene.to_string(),
                name: l.name.clone(),
                is_visible: l.visible,
                property_id: l.property.map(|p| p.to_string()),
                plugin_id: l.plugin.as_ref().map(ToString::to_string),
                extension_id: l.extension.clone(),
                infobox,
                parent_id: None,
                linked_dataset_schema_id: linked_dataset_schema.map(|d| d.to_string()),
                root: *root,
                tag_ids,
                layer_ids: layers.iter().map(ToString::to_string).collect(),
                layers: Vec::new(),
            }),
        }
    }
}
