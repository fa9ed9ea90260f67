/// Ownership checks for todo mutations
///
/// # Permission Model
///
/// 1. **Unowned todo**: anyone may toggle or delete it
/// 2. **Owned todo**: only the principal whose id equals `owner_id`
///
/// Call [`authorize`] only after authentication has succeeded. Checking
/// ownership first would tell an unauthenticated caller who owns what.
///
/// # Example
///
/// ```no_run
/// use todoboard_shared::auth::authenticator::Principal;
/// use todoboard_shared::auth::authorization::authorize;
/// use todoboard_shared::models::todo::Todo;
///
/// fn check(todo: &Todo, principal: Option<&Principal>) -> Result<(), Box<dyn std::error::Error>> {
///     authorize(todo, principal)?;
///     Ok(())
/// }
/// ```

use uuid::Uuid;

use super::authenticator::Principal;
use crate::models::todo::Todo;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthzError {
    /// The todo is owned and the caller supplied no credentials
    #[error("Credentials required to modify todo {0}")]
    CredentialsRequired(Uuid),

    /// The caller is authenticated but does not own the todo
    #[error("Not authorized to modify todo {0}")]
    NotOwner(Uuid),
}

/// Permits or rejects a mutation of `todo` by `principal`
///
/// `None` stands for an anonymous caller.
///
/// # Errors
///
/// - `CredentialsRequired` if the todo is owned and there is no principal
/// - `NotOwner` if the todo is owned by someone else
pub fn authorize(todo: &Todo, principal: Option<&Principal>) -> Result<(), AuthzError> {
    let Some(owner_id) = todo.owner_id else {
        return Ok(());
    };

    match principal {
        None => Err(AuthzError::CredentialsRequired(todo.id)),
        Some(p) if p.user_id == owner_id => Ok(()),
        Some(p) => {
            tracing::warn!(
                todo_id = %todo.id,
                user_id = %p.user_id,
                "Rejected mutation by non-owner"
            );
            Err(AuthzError::NotOwner(todo.id))
        }
    }
}
