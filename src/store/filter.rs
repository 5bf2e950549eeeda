//! Typed filter language with document-store semantics.
//!
//! A [`Filter`] is evaluated identically by every backend:
//!
//! - `Eq` with a `null` value also matches a missing field.
//! - `In` compares the field value (null when missing) against each candidate.
//! - `Contains` matches array fields holding the value.
//! - `And([])` matches everything, `Or([])` matches nothing.
//!
//! Values compare by JSON equality, so an array or object candidate only
//! matches an identical value, never one it contains.
//!
//! The `apply_*` helpers narrow a base filter to the workspaces or scenes a
//! caller may read. `None` means "no restriction" and returns the filter
//! untouched; `Some(&[])` restricts to nothing.

use serde_json::{json, Value as JsonValue};

use crate::id::{to_values, SceneId, WorkspaceId};
use crate::store::document::{lookup_path, JsonMap};

/// Field holding the owning workspace.
pub const WORKSPACE_FIELD: &str = "team";
/// Field holding the owning scene.
pub const SCENE_FIELD: &str = "scene";

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Eq { field: String, value: JsonValue },
    In { field: String, values: Vec<JsonValue> },
    Exists { field: String },
    Contains { field: String, value: JsonValue },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<JsonValue>) -> Self {
        Filter::Eq {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn is_in(field: &str, values: Vec<JsonValue>) -> Self {
        Filter::In {
            field: field.to_string(),
            values,
        }
    }

    pub fn exists(field: &str) -> Self {
        Filter::Exists {
            field: field.to_string(),
        }
    }

    pub fn contains(field: &str, value: impl Into<JsonValue>) -> Self {
        Filter::Contains {
            field: field.to_string(),
            value: value.into(),
        }
    }

    /// Matches the document with the given id.
    pub fn id(id: impl ToString) -> Self {
        Self::eq("id", id.to_string())
    }

    /// Matches documents whose id is one of `ids`.
    pub fn ids<T: ToString>(ids: &[T]) -> Self {
        Self::is_in("id", ids.iter().map(|id| json!(id.to_string())).collect())
    }

    /// Conjoins `other` into this filter, flattening nested `And`s.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, other) => other,
            (this, Filter::All) => this,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), other) => {
                left.push(other);
                Filter::And(left)
            }
            (this, other) => Filter::And(vec![this, other]),
        }
    }

    /// Evaluates the filter against a document body.
    pub fn matches(&self, doc: &JsonMap) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => match lookup_path(doc, field) {
                Some(found) => found == value,
                None => value.is_null(),
            },
            Filter::In { field, values } => {
                let found = lookup_path(doc, field).unwrap_or(&JsonValue::Null);
                values.iter().any(|v| v == found)
            }
            Filter::Exists { field } => lookup_path(doc, field).is_some(),
            Filter::Contains { field, value } => lookup_path(doc, field)
                .and_then(JsonValue::as_array)
                .is_some_and(|items| items.contains(value)),
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }

    /// Renders the filter in document-query notation, for logs.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Filter::All => json!({}),
            Filter::Eq { field, value } => json!({ field: value }),
            Filter::In { field, values } => json!({ field: { "$in": values } }),
            Filter::Exists { field } => json!({ field: { "$exists": true } }),
            Filter::Contains { field, value } => json!({ field: value }),
            Filter::And(filters) => {
                json!({ "$and": filters.iter().map(Filter::to_json).collect::<Vec<_>>() })
            }
            Filter::Or(filters) => {
                json!({ "$or": filters.iter().map(Filter::to_json).collect::<Vec<_>>() })
            }
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Restricts `filter` to documents owned by one of `ids`.
pub fn apply_workspace_filter(filter: Filter, ids: Option<&[WorkspaceId]>) -> Filter {
    match ids {
        None => filter,
        Some(ids) => filter.and(Filter::is_in(WORKSPACE_FIELD, to_values(ids))),
    }
}

/// Restricts `filter` to documents belonging to one of the scenes.
pub fn apply_scene_filter(filter: Filter, ids: Option<&[SceneId]>) -> Filter {
    match ids {
        None => filter,
        Some(ids) => filter.and(Filter::is_in(SCENE_FIELD, to_values(ids))),
    }
}

/// Like [`apply_scene_filter`], but documents with no scene (null, missing or
/// empty) stay visible.
pub fn apply_optional_scene_filter(filter: Filter, ids: Option<&[SceneId]>) -> Filter {
    match ids {
        None => filter,
        Some(ids) => filter.and(Filter::Or(vec![
            Filter::is_in(SCENE_FIELD, to_values(ids)),
            Filter::eq(SCENE_FIELD, JsonValue::Null),
            Filter::eq(SCENE_FIELD, ""),
        ])),
    }
}
