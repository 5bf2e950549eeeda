//! Document-store repositories, one per entity kind.
//!
//! Repositories are cheap to clone and share the store handle. Scoped
//! repositories carry a [`WorkspaceFilter`] or [`SceneFilter`]; `filtered`
//! returns a narrowed copy whose reads only see the readable owners and
//! whose writes to other owners fail with `OperationDenied`.
//!
//! [`Container`] wires them all together and is the DI root.

mod asset;
mod auth_request;
mod collection;
mod config;
mod container;
mod dataset;
mod layer;
mod lock;
mod pagination;
mod plugin;
mod policy;
mod project;
mod property;
mod scene;
mod scene_lock;
mod scope;
mod tag;
mod transaction;
mod user;
mod workspace;

pub use asset::AssetRepository;
pub use auth_request::AuthRequestRepository;
pub use collection::Collection;
pub use config::ConfigRepository;
pub use container::Container;
pub use dataset::{DatasetRepository, DatasetSchemaRepository};
pub use layer::LayerRepository;
pub use lock::Lock;
pub use pagination::{PageInfo, Pagination};
pub use plugin::PluginRepository;
pub use policy::PolicyRepository;
pub use project::ProjectRepository;
pub use property::{PropertyRepository, PropertySchemaRepository};
pub use scene::SceneRepository;
pub use scene_lock::SceneLockRepository;
pub use scope::{SceneFilter, WorkspaceFilter};
pub use tag::TagRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
pub use workspace::WorkspaceRepository;
