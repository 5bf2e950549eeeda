//! Document and streaming types for store results.

use std::pin::Pin;

use futures::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// A JSON object body.
pub type JsonMap = serde_json::Map<String, JsonValue>;

/// A stream of documents from a find.
pub type DocumentStream<'a> = Pin<Box<dyn Stream<Item = Result<Document, AppError>> + Send + 'a>>;

/// Key holding the document id.
pub const ID_KEY: &str = "id";

/// A single stored document: a JSON object with a string `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    data: JsonMap,
}

impl Document {
    /// Wraps a JSON object, checking that it carries a string id.
    pub fn new(data: JsonMap) -> Result<Self, AppError> {
        match data.get(ID_KEY) {
            Some(JsonValue::String(id)) if !id.is_empty() => Ok(Self { data }),
            _ => Err(AppError::Internal(
                "document must have a non-empty string 'id'".to_string(),
            )),
        }
    }

    /// Serializes an entity into a document.
    pub fn from_entity<T: Serialize>(entity: &T) -> Result<Self, AppError> {
        match serde_json::to_value(entity)? {
            JsonValue::Object(data) => Self::new(data),
            other => Err(AppError::Internal(format!(
                "entity serialized to a non-object: {}",
                other
            ))),
        }
    }

    /// Deserializes the document into an entity.
    pub fn into_entity<T: DeserializeOwned>(self) -> Result<T, AppError> {
        Ok(serde_json::from_value(JsonValue::Object(self.data))?)
    }

    /// Returns the document id.
    pub fn id(&self) -> &str {
        self.data
            .get(ID_KEY)
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
    }

    /// Gets a value by key, deserializing to the requested type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not found or if deserialization fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, AppError> {
        self.data
            .get(key)
            .ok_or_else(|| AppError::Internal(format!("key not found: {}", key)))
            .and_then(|v| {
                serde_json::from_value(v.clone()).map_err(|e| {
                    AppError::Internal(format!("failed to deserialize '{}': {}", key, e))
                })
            })
    }

    /// Gets a value, returning `None` if the key is missing or null.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.data.get(key) {
            Some(v) if v.is_null() => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| AppError::Internal(format!("failed to deserialize '{}': {}", key, e))),
            None => Ok(None),
        }
    }

    /// Resolves a dotted path (`members.<user id>.role`) to a raw value.
    pub fn get_path(&self, path: &str) -> Option<&JsonValue> {
        lookup_path(&self.data, path)
    }

    /// Sets a top-level key. The id cannot be changed this way.
    pub fn set(&mut self, key: &str, value: JsonValue) {
        if key != ID_KEY {
            self.data.insert(key.to_string(), value);
        }
    }

    /// Merges top-level keys into the document, keeping the id.
    pub fn merge(&mut self, set: &JsonMap) {
        for (key, value) in set {
            self.set(key, value.clone());
        }
    }

    pub fn as_map(&self) -> &JsonMap {
        &self.data
    }

    /// Consumes the document and returns the underlying object.
    pub fn into_inner(self) -> JsonMap {
        self.data
    }
}

impl TryFrom<JsonValue> for Document {
    type Error = AppError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Object(data) => Self::new(data),
            other => Err(AppError::Internal(format!("not a document: {}", other))),
        }
    }
}

/// Resolves a dotted path inside a JSON object.
pub fn lookup_path<'a>(data: &'a JsonMap, path: &str) -> Option<&'a JsonValue> {
    let mut segments = path.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        id: String,
        name: String,
    }

    fn doc(value: JsonValue) -> Document {
        Document::try_from(value).unwrap()
    }

    #[test]
    fn test_document_requires_id() {
        assert!(Document::try_from(json!({"name": "x"})).is_err());
        assert!(Document::try_from(json!({"id": ""})).is_err());
        assert!(Document::try_from(json!({"id": 1})).is_err());
        assert!(Document::try_from(json!("plain")).is_err());
    }

    #[test]
    fn test_document_entity_roundtrip() {
        let sample = Sample {
            id: "a".into(),
            name: "Layer".into(),
        };
        let d = Document::from_entity(&sample).unwrap();
        assert_eq!(d.id(), "a");
        assert_eq!(d.into_entity::<Sample>().unwrap(), sample);
    }

    #[test]
    fn test_get_and_get_opt() {
        let d = doc(json!({"id": "a", "count": 3, "scene": null}));
        let count: i64 = d.get("count").unwrap();
        assert_eq!(count, 3);
        assert!(d.get::<i64>("missing").is_err());
        assert_eq!(d.get_opt::<String>("scene").unwrap(), None);
        assert_eq!(d.get_opt::<String>("missing").unwrap(), None);
    }

    #[test]
    fn test_get_path() {
        let d = doc(json!({"id": "w", "members": {"u1": {"role": "owner"}}}));
        assert_eq!(d.get_path("members.u1.role"), Some(&json!("owner")));
        assert_eq!(d.get_path("members.u2.role"), None);
        assert_eq!(d.get_path("id.nested"), None);
    }

    #[test]
    fn test_merge_keeps_id() {
        let mut d = doc(json!({"id": "a", "scene": ""}));
        let mut set = JsonMap::new();
        set.insert("id".into(), json!("b"));
        set.insert("scene".into(), JsonValue::Null);
        d.merge(&set);
        assert_eq!(d.id(), "a");
        assert_eq!(d.get_path("scene"), Some(&JsonValue::Null));
    }
}
