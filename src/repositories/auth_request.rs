//! Pending OpenID authorization requests.

use crate::error::AppError;
use crate::id::AuthRequestId;
use crate::models::{AuthRequest, Entity};
use crate::repositories::collection::Collection;
use crate::store::{Filter, IndexSpec};

#[derive(Clone)]
pub struct AuthRequestRepository {
    requests: Collection<AuthRequest>,
}

impl AuthRequestRepository {
    pub fn new(store: crate::store::Store) -> Self {
        Self {
            requests: Collection::new(store),
        }
    }

    /// Creates the lookup indexes. Safe to call repeatedly.
    pub async fn init(&self) -> Result<(), AppError> {
        let store = self.requests.store();
        store
            .ensure_index(AuthRequest::COLLECTION, &IndexSpec::unique("code"))
            .await?;
        store
            .ensure_index(AuthRequest::COLLECTION, &IndexSpec::new("subject"))
            .await
    }

    pub async fn find_by_id(&self, id: AuthRequestId) -> Result<AuthRequest, AppError> {
        self.requests.get(Filter::id(id), id).await
    }

    pub async fn find_by_code(&self, code: &str) -> Result<AuthRequest, AppError> {
        self.requests.get(Filter::eq("code", code), code).await
    }

    pub async fn find_by_subject(&self, subject: &str) -> Result<AuthRequest, AppError> {
        self.requests.get(Filter::eq("subject", subject), subject).await
    }

    pub async fn save(&self, request: &AuthRequest) -> Result<(), AppError> {
        self.requests.save(request).await
    }

    pub async fn remove(&self, id: AuthRequestId) -> Result<(), AppError> {
        self.requests.remove(Filter::id(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backends::memory::MemoryClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_init_is_idempotent_and_code_is_unique() {
        let repo = AuthRequestRepository::new(Arc::new(MemoryClient::new()));
        repo.init().await.unwrap();
        repo.init().await.unwrap();

        let mut a = AuthRequest::new("web", "https://app/cb", "s1", "n1");
        a.code = Some("c1".into());
        repo.save(&a).await.unwrap();

        let mut b = AuthRequest::new("web", "https://app/cb", "s2", "n2");
        b.code = Some("c1".into());
        assert!(matches!(repo.save(&b).await, Err(AppError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = AuthRequestRepository::new(Arc::new(MemoryClient::new()));
        repo.init().await.unwrap();

        let mut req = AuthRequest::new("web", "https://app/cb", "state", "nonce");
        req.code = Some("code".into());
        req.subject = Some("auth0|123".into());
        repo.save(&req).await.unwrap();

        assert_eq!(repo.find_by_id(req.id).await.unwrap(), req);
        assert_eq!(repo.find_by_code("code").await.unwrap().id, req.id);
        assert_eq!(repo.find_by_subject("auth0|123").await.unwrap().id, req.id);
        assert!(repo.find_by_code("other").await.unwrap_err().is_not_found());

        repo.remove(req.id).await.unwrap();
        assert!(repo.find_by_id(req.id).await.unwrap_err().is_not_found());
    }
}
