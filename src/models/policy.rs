use serde::{Deserialize, Serialize};

use crate::id::PolicyId;

/// Usage limits attached to a workspace. `None` means unlimited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub name: String,
    pub project_count: Option<i64>,
    pub member_count: Option<i64>,
    pub published_project_count: Option<i64>,
    pub layer_count: Option<i64>,
    pub asset_storage_size: Option<i64>,
}

super::entity!(Policy, PolicyId, "policy", "Policy");
