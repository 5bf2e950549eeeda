use serde::{Deserialize, Serialize};

/// Server-wide settings kept in the store as a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Version of the last applied data migration.
    #[serde(default)]
    pub migration: i64,
    pub auth: Option<AuthConfig>,
}

/// Signing material for the built-in auth server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub cert: String,
    pub key: String,
}
