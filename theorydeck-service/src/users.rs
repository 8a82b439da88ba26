//! Accounts and role administration.
use std::sync::Arc;

use serde::Deserialize;
use theorydeck_repository::{Store, UserRepository};
use theorydeck_shared::types::{NewUser, User, UserId, UserRole, UserUpdate};
use theorydeck_shared::validation::validate_email;
use theorydeck_shared::ValidationErrors;
use tracing::{info, warn};

use crate::errors::ServiceError;

/// Body of a registration request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub name: Option<String>,
}

pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn require_admin(caller: &User) -> Result<(), ServiceError> {
        if caller.role.can_admin() {
            Ok(())
        } else {
            Err(ServiceError::forbidden("Administrator rights required"))
        }
    }

    /// Looks up the user behind a caller id.
    pub async fn find(&self, id: UserId) -> Result<Option<User>, ServiceError> {
        Ok(self.store.get_user(id).await?)
    }

    /// Registers a new account with the `USER` role.
    ///
    /// Emails are compared after trimming and lower-casing.
    pub async fn register(&self, input: RegisterInput) -> Result<User, ServiceError> {
        let email = input.email.unwrap_or_default().trim().to_lowercase();
        if !validate_email(&email) {
            let mut errors = ValidationErrors::new();
            errors.add("email", "Invalid email address");
            return Err(errors.into());
        }

        let user = self
            .store
            .create_user(&NewUser {
                email,
                name: input.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
                role: UserRole::User,
            })
            .await?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub async fn list(&self, caller: &User, role: Option<UserRole>) -> Result<Vec<User>, ServiceError> {
        Self::require_admin(caller)?;
        Ok(self.store.list_users(role).await?)
    }

    /// Changes a user's role or display name. Admins only.
    pub async fn update(&self, caller: &User, id: UserId, update: UserUpdate) -> Result<User, ServiceError> {
        Self::require_admin(caller)?;
        let user = self
            .store
            .update_user(id, &update)
            .await?
            .ok_or(ServiceError::NotFound("User"))?;

        if let Some(role) = update.role {
            info!(user_id = %id, role = %role, admin_id = %caller.id, "User role changed");
        }
        Ok(user)
    }

    /// Makes sure at least one administrator exists.
    ///
    /// When none does, the account with `email` is promoted, or created if it
    /// is not registered yet. Returns the administrator that was created or
    /// promoted, or `None` when one already existed.
    pub async fn ensure_admin(&self, email: &str) -> Result<Option<User>, ServiceError> {
        if let Some(existing) = self.store.list_users(Some(UserRole::Admin)).await?.first() {
            info!(admin_id = %existing.id, "Administrator already present");
            return Ok(None);
        }

        let email = email.trim().to_lowercase();
        if !validate_email(&email) {
            return Err(ServiceError::bad_request(format!("Invalid admin email '{email}'")));
        }

        let admin = match self.store.get_user_by_email(&email).await? {
            Some(user) => self
                .store
                .update_user(
                    user.id,
                    &UserUpdate {
                        role: Some(UserRole::Admin),
                        name: None,
                    },
                )
                .await?
                .ok_or(ServiceError::NotFound("User"))?,
            None => {
                self.store
                    .create_user(&NewUser {
                        email,
                        name: Some("Admin".to_string()),
                        role: UserRole::Admin,
                    })
                    .await?
            }
        };

        warn!(admin_id = %admin.id, email = %admin.email, "Bootstrapped administrator account");
        Ok(Some(admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seed_user;
    use theorydeck_repository::MemoryStore;

    #[tokio::test]
    async fn test_register_normalizes_and_rejects_duplicates() {
        let service = UserService::new(Arc::new(MemoryStore::new()));

        let user = service
            .register(RegisterInput {
                email: Some("  Ada@Example.com ".to_string()),
                name: Some("Ada".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, UserRole::User);

        let duplicate = service
            .register(RegisterInput {
                email: Some("ada@example.com".to_string()),
                name: None,
            })
            .await;
        assert!(matches!(duplicate, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email() {
        let service = UserService::new(Arc::new(MemoryStore::new()));
        let result = service
            .register(RegisterInput {
                email: Some("not-an-email".to_string()),
                name: None,
            })
            .await;

        match result {
            Err(ServiceError::Validation(errors)) => assert!(errors.get("email").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_only_admins_manage_users() {
        let store = Arc::new(MemoryStore::new());
        let user = seed_user(&store, "u@example.com", UserRole::User).await;
        let admin = seed_user(&store, "admin@example.com", UserRole::Admin).await;
        let service = UserService::new(store);

        let promote = UserUpdate {
            role: Some(UserRole::Moderator),
            name: None,
        };
        let denied = service.update(&user, user.id, promote.clone()).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        let promoted = service.update(&admin, user.id, promote).await.unwrap();
        assert_eq!(promoted.role, UserRole::Moderator);

        let moderators = service.list(&admin, Some(UserRole::Moderator)).await.unwrap();
        assert_eq!(moderators.len(), 1);
        assert!(matches!(service.list(&user, None).await, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_then_noops() {
        let service = UserService::new(Arc::new(MemoryStore::new()));

        let created = service.ensure_admin("root@example.com").await.unwrap().unwrap();
        assert_eq!(created.role, UserRole::Admin);
        assert!(service.ensure_admin("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ensure_admin_promotes_existing_account() {
        let store = Arc::new(MemoryStore::new());
        let existing = seed_user(&store, "boss@example.com", UserRole::User).await;
        let service = UserService::new(store);

        let promoted = service.ensure_admin("boss@example.com").await.unwrap().unwrap();
        assert_eq!(promoted.id, existing.id);
        assert_eq!(promoted.role, UserRole::Admin);
    }
}
