use crate::error::AppError;
use crate::id::UserId;
use crate::models::User;
use crate::repositories::collection::Collection;
use crate::store::{Filter, Store};

#[derive(Clone)]
pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    pub fn new(store: Store) -> Self {
        Self {
            users: Collection::new(store),
        }
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<User, AppError> {
        self.users.get(Filter::id(id), id).await
    }

    pub async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<Option<User>>, AppError> {
        self.users.find_by_ids(ids, Filter::All).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        self.users.get(Filter::eq("email", email), email).await
    }

    /// The user an identity provider subject belongs to.
    pub async fn find_by_sub(&self, sub: &str) -> Result<User, AppError> {
        self.users.get(Filter::contains("subs", sub), sub).await
    }

    pub async fn save(&self, user: &User) -> Result<(), AppError> {
        self.users.save(user).await
    }

    pub async fn remove(&self, id: UserId) -> Result<(), AppError> {
        self.users.remove_one(Filter::id(id), id).await
    }
}
