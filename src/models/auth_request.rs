use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::AuthRequestId;

/// A pending OpenID authorization request.
///
/// `code` is set once the user has authenticated and `subject` once the
/// request is bound to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthRequest {
    pub id: AuthRequestId,
    pub client_id: String,
    pub redirect_uri: String,
    pub state: String,
    pub nonce: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub code: Option<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuthRequest {
    pub fn new(client_id: &str, redirect_uri: &str, state: &str, nonce: &str) -> Self {
        Self {
            id: AuthRequestId::new(),
            client_id: client_id.to_string(),
            redirect_uri: redirect_uri.to_string(),
            state: state.to_string(),
            nonce: nonce.to_string(),
            scopes: Vec::new(),
            code: None,
            subject: None,
            created_at: Utc::now(),
        }
    }
}

super::entity!(AuthRequest, AuthRequestId, "authRequest", "AuthRequest");
