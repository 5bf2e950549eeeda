//! Backend implementations of the document store traits.
//!
//! Each backend implements [`DocumentExecutor`](crate::store::DocumentExecutor)
//! for both its client and its transaction type, plus
//! [`Transaction`](crate::store::Transaction) and
//! [`DocumentClient`](crate::store::DocumentClient).
//!
//! | Backend | Module | Use |
//! |---------|--------|-----|
//! | PostgreSQL JSONB | [`postgres`] | Production |
//! | In-memory | [`memory`] | Tests, local runs |

pub mod memory;
pub mod postgres;
