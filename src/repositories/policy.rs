use crate::error::AppError;
use crate::id::PolicyId;
use crate::models::Policy;
use crate::repositories::collection::Collection;
use crate::store::{Filter, Store};

/// Read-only access to workspace policies.
#[derive(Clone)]
pub struct PolicyRepository {
    policies: Collection<Policy>,
}

impl PolicyRepository {
    pub fn new(store: Store) -> Self {
        Self {
            policies: Collection::new(store),
        }
    }

    pub async fn find_by_id(&self, id: PolicyId) -> Result<Policy, AppError> {
        self.policies.get(Filter::id(id), id).await
    }

    pub async fn find_by_ids(&self, ids: &[PolicyId]) -> Result<Vec<Option<Policy>>, AppError> {
        self.policies.find_by_ids(ids, Filter::All).await
    }
}
