/// User model and repository
///
/// Users register with a name and a password. Only the Argon2id hash of the
/// password is ever stored. Names are unique and do not change after
/// registration; the hash changes through [`UserRepository::set_password`].
///
/// Deleting a user does not touch the todos they own.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todoboard_shared::auth::password::CredentialHasher;
/// use todoboard_shared::models::user::UserRepository;
/// use todoboard_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let users = UserRepository::new(Arc::new(MemoryStore::new()));
/// let hash = CredentialHasher::default().hash("123456").await?;
///
/// let user = users.create("ademir", &hash).await?;
/// let found = users.find_by_name("ademir").await?;
/// assert_eq!(user.id, found.id);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RepositoryError, RepositoryResult};
use crate::store::UserStore;

/// User account
///
/// Serialize/Deserialize cover internal use only; the HTTP layer exposes a
/// view without `password_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned id
    pub id: Uuid,

    /// Unique login name
    pub name: String,

    /// Argon2id PHC string, never the plaintext
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last written
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name
    pub name: String,

    /// Argon2id hash (NOT the plaintext password!)
    pub password_hash: String,
}

/// Repository for [`User`] records
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
}

impl UserRepository {
    /// Creates a repository over `store`
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Registers a user
    ///
    /// # Errors
    ///
    /// - `Validation` if `name` or `password_hash` is empty
    /// - `Uniqueness` if the name is already registered
    pub async fn create(&self, name: &str, password_hash: &str) -> RepositoryResult<User> {
        if name.trim().is_empty() {
            return Err(RepositoryError::Validation("Missing name".to_string()));
        }
        if password_hash.is_empty() {
            return Err(RepositoryError::Validation("Missing hash".to_string()));
        }

        let user = self
            .store
            .insert_user(NewUser {
                name: name.to_string(),
                password_hash: password_hash.to_string(),
            })
            .await?;

        tracing::info!(user_id = %user.id, name = %user.name, "User registered");
        Ok(user)
    }

    /// Finds a user by name
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has that name.
    pub async fn find_by_name(&self, name: &str) -> RepositoryResult<User> {
        self.store
            .find_user_by_name(name)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("User '{}'", name)))
    }

    /// Finds a user by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has that id.
    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("User {}", id)))
    }

    /// Lists all users, oldest first
    pub async fn list(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.store.find_all_users().await?)
    }

    /// Counts registered users
    pub async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.store.find_all_users().await?.len())
    }

    /// Replaces the stored hash of `user` with `new_hash`
    ///
    /// # Errors
    ///
    /// - `Validation` if `new_hash` is empty
    /// - `NotFound` if the user was deleted in the meantime
    pub async fn set_password(&self, user: User, new_hash: &str) -> RepositoryResult<User> {
        if new_hash.is_empty() {
            return Err(RepositoryError::Validation("Missing hash".to_string()));
        }

        let stored = self
            .save(User {
                password_hash: new_hash.to_string(),
                ..user
            })
            .await?;

        tracing::info!(user_id = %stored.id, "User password changed");
        Ok(stored)
    }

    /// Re-persists `user` as given, bumping `updated_at`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user was deleted in the meantime.
    pub async fn save(&self, user: User) -> RepositoryResult<User> {
        self.store
            .replace_user(&user)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("User '{}'", user.name)))
    }

    /// Deletes `user`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record is already gone.
    pub async fn delete(&self, user: &User) -> RepositoryResult<()> {
        if !self.store.remove_user(user.id).await? {
            return Err(RepositoryError::NotFound(format!("User '{}'", user.name)));
        }

        tracing::info!(user_id = %user.id, "User deleted");
        Ok(())
    }
}
