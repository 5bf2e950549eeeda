use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ProjectId, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(rename = "team")]
    pub workspace: WorkspaceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Public URL slug, unique across projects once published.
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub archived: bool,
    pub visualizer: String,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(workspace: WorkspaceId, name: &str) -> Self {
        Self {
            id: ProjectId::new(),
            workspace,
            name: name.to_string(),
            description: String::new(),
            alias: String::new(),
            archived: false,
            visualizer: "cesium".to_string(),
            updated_at: Utc::now(),
        }
    }
}

super::entity!(Project, ProjectId, "project", "Project");

impl super::WorkspaceOwned for Project {
    fn workspace(&self) -> WorkspaceId {
        self.workspace
    }
}
