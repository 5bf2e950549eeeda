use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{PolicyId, UserId, WorkspaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Writer,
    Maintainer,
    Owner,
}

impl Role {
    pub fn can_write(&self) -> bool {
        *self >= Role::Writer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub role: Role,
    pub invited_by: Option<UserId>,
}

/// A team of users that owns projects and assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    /// Members keyed by user id.
    #[serde(default)]
    pub members: BTreeMap<UserId, Member>,
    #[serde(default)]
    pub personal: bool,
    pub policy: Option<PolicyId>,
}

impl Workspace {
    pub fn new(name: &str, owner: UserId) -> Self {
        let mut members = BTreeMap::new();
        members.insert(
            owner,
            Member {
                role: Role::Owner,
                invited_by: None,
            },
        );
        Self {
            id: WorkspaceId::new(),
            name: name.to_string(),
            members,
            personal: false,
            policy: None,
        }
    }

    pub fn role_of(&self, user: UserId) -> Option<Role> {
        self.members.get(&user).map(|m| m.role)
    }
}

super::entity!(Workspace, WorkspaceId, "workspace", "Workspace");
