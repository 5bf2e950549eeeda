//! Data migrations with version tracking.
//!
//! Migrations are:
//! - **Forward-only**: No rollback support - add a compensating migration instead
//! - **Version-tracked**: The last applied version lives in the config document
//! - **Serialized**: The runner holds the config lock, so concurrent servers
//!   never apply the same migration twice
//! - **Auto-applied**: `Container::build` runs them before handing out repositories

mod m001_indexes;
mod m002_null_scene;
mod runner;
mod traits;

pub use m001_indexes::M001Indexes;
pub use m002_null_scene::M002NullScene;
pub use runner::{MigrationClient, MigrationResult};
pub use traits::{Migration, Register};

/// Creates the register of shipped migrations.
pub fn create_register() -> Register {
    Register::new().register(M001Indexes).register(M002NullScene)
}
