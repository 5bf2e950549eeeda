//! GraphQL view models and their lookup helpers.
//!
//! View models are request-scoped snapshots built from [`crate::models`]
//! through `From` conversions. Their lookups are exact-id linear scans:
//!
//! - an empty id never matches anything
//! - the first match in insertion order wins
//! - an absent container is an `Option::None` at the call site, so
//!   `maybe_property.and_then(|p| p.field(id))` is the usual shape
//!
//! Lookups are read-only and never fail.

mod dataset;
mod infobox;
mod layer;
mod lookup;
mod merged;
mod page_info;
mod plugin;
mod property;
mod scene;

pub use dataset::{Dataset, DatasetField, DatasetSchema, DatasetSchemaField};
pub use infobox::{Infobox, InfoboxField, MergedInfobox, MergedInfoboxField};
pub use layer::{attach_parent_layer, Layer, LayerGroup, LayerItem};
pub use merged::{MergedProperty, MergedPropertyField, MergedPropertyGroup};
pub use page_info::PageInfo;
pub use plugin::{Plugin, PluginExtension};
pub use property::{
    property_field_id, Property, PropertyField, PropertyFieldLink, PropertyGroup,
    PropertyGroupList, PropertyItem, PropertyItemRef, PropertySchema, PropertySchemaField,
    PropertySchemaGroup,
};
pub use scene::{Scene, ScenePlugin, SceneWidget};

/// GraphQL `ID` scalar.
pub type ID = String;

/// GraphQL `Node` interface: an object addressable by a global id.
pub trait Node {
    fn id(&self) -> &str;
}
