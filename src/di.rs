//! Dependency injection infrastructure.
//!
//! Dependencies are resolved at compile time through the `FromRef` trait and
//! the derive macros from `di-macros`.
//!
//! # Overview
//!
//! - `FromRef<T>`: Trait for extracting a value from a reference to `T`
//! - `#[derive(Context)]`: Makes each field of a struct extractable via `FromRef`
//! - `#[derive(FromContext)]`: Generates a `FromRef` impl by resolving each field
//!
//! [`Container`](crate::repositories::Container) is the root. Anything built
//! from repositories derives `FromContext` against it:
//!
//! ```ignore
//! use crate::di::{FromContext, FromRef};
//! use crate::repositories::{Container, ConfigRepository};
//! use crate::store::Store;
//!
//! #[derive(FromContext, Clone)]
//! #[from_context(Context = Container)]
//! pub struct MigrationClient {
//!     store: Store,               // resolved via FromRef<Container>
//!     config: ConfigRepository,
//! }
//!
//! let client = MigrationClient::from_ref(&container);
//! ```

/// Trait for extracting a value from a reference to another type.
///
/// This is the core trait for compile-time dependency injection.
/// Types that implement `FromRef<T>` can be extracted from `&T`.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Blanket implementation: any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

// Re-export derive macros
pub use di_macros::{Context, FromContext};
