/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id credential hashing and verification
/// - [`authenticator`]: name/password to principal, re-run on every mutating request
/// - [`authorization`]: single-owner checks for todo mutations
///
/// # Example
///
/// ```no_run
/// use todoboard_shared::auth::password::{hash_password, verify_password, HashParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password", &HashParams::default())?;
/// assert!(verify_password("user_password", &hash));
/// # Ok(())
/// # }
/// ```

pub mod authenticator;
pub mod authorization;
pub mod password;
