//! Empty scene ids become null.
//!
//! System plugins and their property schemas used to be written with
//! `scene: ""`. The optional scene filter treats both the same, but exact
//! lookups on `scene` need a single representation.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::migrations::Migration;
use crate::store::{Filter, JsonMap, Transaction, SCENE_FIELD};

pub struct M002NullScene;

impl Migration for M002NullScene {
    fn id(&self) -> &'static str {
        "m002_null_scene"
    }

    fn version(&self) -> i64 {
        2
    }

    fn description(&self) -> &'static str {
        "Replace empty scene ids on plugins and property schemas with null"
    }

    fn up<'a>(&'a self, txn: &'a dyn Transaction) -> BoxFuture<'a, Result<(), AppError>> {
        async move {
            let mut set = JsonMap::new();
            set.insert(SCENE_FIELD.to_string(), JsonValue::Null);

            for collection in ["plugin", "propertySchema"] {
                let updated = txn
                    .update_documents(collection, &Filter::eq(SCENE_FIELD, ""), set.clone())
                    .await?;
                tracing::debug!(collection, updated, "Cleared empty scene ids");
            }
            Ok(())
        }
        .boxed()
    }
}
