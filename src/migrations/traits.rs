//! Migration trait and registry.

use futures::future::BoxFuture;

use crate::error::AppError;
use crate::store::Transaction;

/// A forward-only data migration.
///
/// Uses `BoxFuture` so the trait stays object-safe without `'static` bounds
/// on the transaction.
pub trait Migration: Send + Sync {
    fn id(&self) -> &'static str;
    /// Ordering key. Applied migrations are recorded by version.
    fn version(&self) -> i64;
    fn description(&self) -> &'static str;
    fn up<'a>(&'a self, txn: &'a dyn Transaction) -> BoxFuture<'a, Result<(), AppError>>;
}

/// Migrations in version order.
pub struct Register {
    migrations: Vec<Box<dyn Migration>>,
}

impl Register {
    pub fn new() -> Self {
        Self {
            migrations: Vec::new(),
        }
    }

    /// Adds a migration, keeping the register sorted by version.
    pub fn register(mut self, migration: impl Migration + 'static) -> Self {
        self.migrations.push(Box::new(migration));
        self.migrations.sort_by_key(|m| m.version());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Migration> {
        self.migrations.iter().map(|m| m.as_ref())
    }

    /// Migrations with a version above `current`.
    pub fn pending(&self, current: i64) -> impl Iterator<Item = &dyn Migration> {
        self.iter().filter(move |m| m.version() > current)
    }

    /// Highest registered version, or 0 when empty.
    pub fn latest_version(&self) -> i64 {
        self.migrations.last().map(|m| m.version()).unwrap_or(0)
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}
