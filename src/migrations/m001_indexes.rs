//! Secondary indexes for the lookups repositories make.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::AppError;
use crate::migrations::Migration;
use crate::store::{IndexSpec, Transaction};

/// Collection indexes.
pub struct M001Indexes;

const INDEXES: &[(&str, &str)] = &[
    ("asset", "team"),
    ("dataset", "scene"),
    ("dataset", "schema"),
    ("datasetSchema", "scene"),
    ("layer", "scene"),
    ("layer", "property"),
    ("plugin", "scene"),
    ("project", "team"),
    ("project", "alias"),
    ("property", "scene"),
    ("property", "schema"),
    ("propertySchema", "scene"),
    ("scene", "team"),
    ("scene", "project"),
    ("tag", "scene"),
    ("user", "email"),
];

impl Migration for M001Indexes {
    fn id(&self) -> &'static str {
        "m001_indexes"
    }

    fn version(&self) -> i64 {
        1
    }

    fn description(&self) -> &'static str {
        "Secondary indexes on owner and lookup fields"
    }

    fn up<'a>(&'a self, txn: &'a dyn Transaction) -> BoxFuture<'a, Result<(), AppError>> {
        async move {
            for (collection, field) in INDEXES {
                txn.ensure_index(collection, &IndexSpec::new(field)).await?;
            }
            Ok(())
        }
        .boxed()
    }
}
