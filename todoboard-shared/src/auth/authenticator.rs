/// Per-request authentication
///
/// There are no sessions or tokens. Every mutating request carries a name and a
/// password, and [`Authenticator::authenticate`] resolves them to a
/// [`Principal`] from scratch each time.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todoboard_shared::auth::authenticator::Authenticator;
/// use todoboard_shared::auth::password::CredentialHasher;
/// use todoboard_shared::models::user::UserRepository;
/// use todoboard_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let users = UserRepository::new(Arc::new(MemoryStore::new()));
/// let auth = Authenticator::new(users, CredentialHasher::default());
///
/// let principal = auth.authenticate("ademir", "123456").await?;
/// println!("Authenticated as {}", principal.user_id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::password::CredentialHasher;
use crate::models::user::UserRepository;
use crate::models::RepositoryError;

/// Error type for authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No user is registered under the claimed name
    #[error("No such user")]
    NoSuchUser,

    /// The password does not match the stored hash
    #[error("Bad credentials")]
    BadCredentials,

    /// The request carried no credentials where some were required
    #[error("Missing credentials")]
    MissingCredentials,

    /// Lookup failed for a reason other than absence
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The authenticated user behind the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Authenticated user id
    pub user_id: Uuid,

    /// Name the user authenticated with
    pub name: String,
}

/// Resolves name/password pairs to principals
#[derive(Clone)]
pub struct Authenticator {
    users: UserRepository,
    hasher: CredentialHasher,
}

impl Authenticator {
    /// Creates an authenticator over the user repository
    pub fn new(users: UserRepository, hasher: CredentialHasher) -> Self {
        Self { users, hasher }
    }

    /// Verifies `password` for the user called `name`
    ///
    /// Read-only against the user repository.
    ///
    /// # Errors
    ///
    /// - `NoSuchUser` if the name is not registered
    /// - `BadCredentials` if the password does not verify
    pub async fn authenticate(&self, name: &str, password: &str) -> Result<Principal, AuthError> {
        let user = match self.users.find_by_name(name).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound(_)) => {
                tracing::debug!(name, "Authentication failed: no such user");
                return Err(AuthError::NoSuchUser);
            }
            Err(e) => return Err(e.into()),
        };

        if !self.hasher.verify(&user.password_hash, password).await {
            tracing::debug!(user_id = %user.id, "Authentication failed: bad credentials");
            return Err(AuthError::BadCredentials);
        }

        Ok(Principal {
            user_id: user.id,
            name: user.name,
        })
    }

    /// Authenticates when credentials were supplied
    ///
    /// `None` passes through as an anonymous caller.
    pub async fn authenticate_optional(
        &self,
        credentials: Option<(&str, &str)>,
    ) -> Result<Option<Principal>, AuthError> {
        match credentials {
            Some((name, password)) => self.authenticate(name, password).await.map(Some),
            None => Ok(None),
        }
    }
}
