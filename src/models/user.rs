use serde::{Deserialize, Serialize};

use crate::id::{UserId, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Subjects issued by identity providers for this user.
    #[serde(default)]
    pub subs: Vec<String>,
    /// The user's personal workspace.
    #[serde(rename = "team")]
    pub workspace: WorkspaceId,
    pub lang: Option<String>,
}

impl User {
    pub fn new(name: &str, email: &str, workspace: WorkspaceId) -> Self {
        Self {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            subs: Vec::new(),
            workspace,
            lang: None,
        }
    }
}

super::entity!(User, UserId, "user", "User");
