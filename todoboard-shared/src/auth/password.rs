/// Password hashing module using Argon2id
///
/// Every stored credential is a PHC string that embeds the algorithm, the cost
/// parameters, a fresh random salt and the digest, so verification needs nothing
/// but the stored value.
///
/// # Security
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 64 MB (65536 KB) by default
/// - **Iterations**: 3 passes by default
/// - **Parallelism**: 4 lanes by default
/// - **Output**: 32-byte hash
///
/// The async entry points on [`CredentialHasher`] move the CPU-heavy work onto
/// tokio's blocking pool so a slow hash never stalls other requests.
///
/// # Example
///
/// ```
/// use todoboard_shared::auth::password::{hash_password, verify_password, HashParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = HashParams::default();
/// let hash = hash_password("super_secret_password_123", &params)?;
///
/// assert!(verify_password("super_secret_password_123", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// The cost parameters were rejected by Argon2
    #[error("Invalid hash parameters: {0}")]
    InvalidParams(String),

    /// The blocking worker running the hash did not complete
    #[error("Hashing task failed: {0}")]
    TaskFailed(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl HashParams {
    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, Some(32))
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hashes a password using Argon2id with a fresh random salt
///
/// Two calls with the same password produce different strings; both verify.
///
/// # Returns
///
/// PHC string format hash, e.g.
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::InvalidParams` if the cost parameters are out of range
/// and `PasswordError::HashError` if hashing fails.
pub fn hash_password(password: &str, params: &HashParams) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = params.argon2()?;

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// The digest is recomputed with the salt and parameters embedded in `hash` and
/// compared in constant time. Malformed or foreign hash strings never error,
/// they simply do not verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::debug!("Stored password hash could not be parsed");
        return false;
    };

    // Parameters come from the parsed hash, not from this instance
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Credential hasher used by the repositories and the authenticator
///
/// Cheap to clone; holds only the cost parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher {
    params: HashParams,
}

impl CredentialHasher {
    /// Creates a hasher with the given cost parameters
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::InvalidParams` if Argon2 rejects the parameters.
    pub fn new(params: HashParams) -> Result<Self, PasswordError> {
        params.argon2()?;
        Ok(Self { params })
    }

    /// Returns the configured cost parameters
    pub fn params(&self) -> HashParams {
        self.params
    }

    /// Hashes `password` on the blocking pool
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let params = self.params;
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hash_password(&password, &params))
            .await
            .map_err(|e| PasswordError::TaskFailed(e.to_string()))?
    }

    /// Verifies `password` against `hash` on the blocking pool
    ///
    /// A worker that fails to complete counts as a failed verification.
    pub async fn verify(&self, hash: &str, password: &str) -> bool {
        let hash = hash.to_owned();
        let password = password.to_owned();

        match tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}
