//! Typed ULID identifiers for persisted entities.

use std::str::FromStr;

use ulid::Ulid;

use crate::error::AppError;

/// Declares a ULID-backed identifier newtype.
///
/// Ids serialize as their canonical 26-character string, so they can be
/// stored as document keys and compared against GraphQL `ID` values.
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
            #[serde(transparent)]
            pub struct $name(Ulid);

            impl $name {
                /// Generates a new id.
                pub fn new() -> Self {
                    Self(Ulid::new())
                }

                /// Returns the creation time encoded in the id.
                pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
                    chrono::DateTime::<chrono::Utc>::from(self.0.datetime())
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    std::fmt::Display::fmt(&self.0, f)
                }
            }

            impl FromStr for $name {
                type Err = AppError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ulid::from_string(s)
                        .map(Self)
                        .map_err(|_| AppError::InvalidId(s.to_string()))
                }
            }

            impl From<$name> for serde_json::Value {
                fn from(id: $name) -> Self {
                    serde_json::Value::String(id.to_string())
                }
            }
        )+
    };
}

define_id!(
    AssetId,
    DatasetId,
    DatasetSchemaId,
    LayerId,
    PolicyId,
    ProjectId,
    PropertyId,
    PropertySchemaId,
    SceneId,
    TagId,
    UserId,
    WorkspaceId,
    AuthRequestId,
    InfoboxFieldId,
    PropertyItemId,
    WidgetId,
);

/// Parses a list of id strings, failing on the first invalid one.
pub fn parse_ids<T: FromStr<Err = AppError>>(ids: &[impl AsRef<str>]) -> Result<Vec<T>, AppError> {
    ids.iter().map(|id| id.as_ref().parse()).collect()
}

/// Converts ids to JSON values for use in store filters.
pub fn to_values<T: Copy + Into<serde_json::Value>>(ids: &[T]) -> Vec<serde_json::Value> {
    ids.iter().map(|&id| id.into()).collect()
}

/// Plugin ids are `name~version`, or just `name` for built-in system plugins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PluginId(String);

impl PluginId {
    pub fn new(name: &str, version: Option<&str>) -> Self {
        match version {
            Some(v) => Self(format!("{}~{}", name, v)),
            None => Self(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        self.0.split('~').next().unwrap_or_default()
    }

    pub fn version(&self) -> Option<&str> {
        self.0.split_once('~').map(|(_, v)| v)
    }

    /// System plugins ship with the server and are not bound to a scene.
    pub fn is_system(&self) -> bool {
        self.version().is_none()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PluginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PluginId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.matches('~').count() > 1 {
            return Err(AppError::InvalidId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<PluginId> for serde_json::Value {
    fn from(id: PluginId) -> Self {
        serde_json::Value::String(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_through_string() {
        let id = SceneId::new();
        let parsed: SceneId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_invalid_id() {
        let err = "not-a-ulid".parse::<LayerId>().unwrap_err();
        assert!(matches!(err, AppError::InvalidId(s) if s == "not-a-ulid"));
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = WorkspaceId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }

    #[test]
    fn test_parse_ids_fails_on_first_invalid() {
        let good = SceneId::new().to_string();
        assert!(parse_ids::<SceneId>(&[good.as_str(), "bad"]).is_err());
        assert_eq!(parse_ids::<SceneId>(&[good.as_str()]).unwrap().len(), 1);
    }

    #[test]
    fn test_plugin_id() {
        let id = PluginId::new("marker", Some("1.0.0"));
        assert_eq!(id.as_str(), "marker~1.0.0");
        assert_eq!(id.name(), "marker");
        assert_eq!(id.version(), Some("1.0.0"));
        assert!(!id.is_system());

        let system: PluginId = "builtin".parse().unwrap();
        assert!(system.is_system());
        assert!("a~b~c".parse::<PluginId>().is_err());
    }
}
