use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{AssetId, WorkspaceId};

/// An uploaded file owned by a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    #[serde(rename = "team")]
    pub workspace: WorkspaceId,
    pub name: String,
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(workspace: WorkspaceId, name: &str, url: &str, size: u64, content_type: &str) -> Self {
        Self {
            id: AssetId::new(),
            workspace,
            name: name.to_string(),
            url: url.to_string(),
            size,
            content_type: content_type.to_string(),
            created_at: Utc::now(),
        }
    }
}

super::entity!(Asset, AssetId, "asset", "Asset");

impl super::WorkspaceOwned for Asset {
    fn workspace(&self) -> WorkspaceId {
        self.workspace
    }
}
