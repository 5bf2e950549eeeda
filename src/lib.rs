//! geoscene - data layer of a scene editor backend
//!
//! Document-store repositories wired into a dependency-injection container,
//! plus the lookup helpers GraphQL resolvers use on view models.

pub mod cli;
pub mod config;
pub mod di;
pub mod error;
pub mod gqlmodel;
pub mod id;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod store;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
