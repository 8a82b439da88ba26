use theorydeck_shared::types::{NewUser, User, UserId, UserRole, UserUpdate};

use crate::errors::RepositoryError;

/// A trait that defines the interface for persisting users.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `RepositoryError::Conflict`
    /// when the email is already registered.
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Batch lookup for attaching authors to read models. Unknown ids are
    /// skipped.
    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError>;

    /// Lists users newest first, optionally restricted to one role.
    async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>, RepositoryError>;

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Option<User>, RepositoryError>;
}
