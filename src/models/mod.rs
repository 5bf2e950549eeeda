//! Persistent domain entities.
//!
//! Each entity is stored as one JSON document in its own collection. The
//! owning workspace is stored under `team` and the owning scene under `scene`
//! so the scope filters in [`crate::store`] apply uniformly.

mod asset;
mod auth_request;
mod dataset;
mod layer;
mod plugin;
mod policy;
mod project;
mod property;
mod property_schema;
mod scene;
mod scene_lock;
mod system_config;
mod tag;
mod user;
mod workspace;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::id::{SceneId, WorkspaceId};

pub use asset::Asset;
pub use auth_request::AuthRequest;
pub use dataset::{Dataset, DatasetField, DatasetSchema, DatasetSchemaField};
pub use layer::{Infobox, InfoboxField, Layer, LayerKind};
pub use plugin::{Plugin, PluginExtension};
pub use policy::Policy;
pub use project::Project;
pub use property::{Property, PropertyField, PropertyGroup, PropertyGroupList, PropertyItem, PropertyLink};
pub use property_schema::{PropertySchema, PropertySchemaField, PropertySchemaGroup};
pub use scene::{Scene, ScenePlugin, SceneWidget};
pub use scene_lock::{SceneLock, SceneLockMode};
pub use system_config::{AuthConfig, SystemConfig};
pub use tag::{Tag, TagKind};
pub use user::User;
pub use workspace::{Member, Role, Workspace};

/// A document-backed entity with a typed id.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: Clone + ToString + Send + Sync;

    /// Collection the entity is stored in.
    const COLLECTION: &'static str;
    /// Name used in not-found errors.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
}

/// An entity owned by a workspace.
pub trait WorkspaceOwned: Entity {
    fn workspace(&self) -> WorkspaceId;
}

/// An entity owned by a scene. System-wide entities return `None`.
pub trait SceneOwned: Entity {
    fn scene(&self) -> Option<SceneId>;
}

/// Implements [`Entity`] for a struct with an `id` field.
macro_rules! entity {
    ($ty:ty, $id:ty, $collection:literal, $kind:literal) => {
        impl $crate::models::Entity for $ty {
            type Id = $id;
            const COLLECTION: &'static str = $collection;
            const KIND: &'static str = $kind;

            fn id(&self) -> Self::Id {
                self.id.clone()
            }
        }
    };
}

pub(crate) use entity;
