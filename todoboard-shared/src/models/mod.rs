/// Domain models and their repositories
///
/// # Models
///
/// - `user`: registered accounts, unique by name, holding an Argon2id hash
/// - `todo`: shared task list entries, optionally owned by a user
///
/// Repositories wrap a store and run every validation rule before anything is
/// persisted, so a rejected create or update never reaches the store.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todoboard_shared::models::todo::TodoRepository;
/// use todoboard_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let todos = TodoRepository::new(Arc::new(MemoryStore::new()));
///
/// let todo = todos.create("Be awesome", None).await?;
/// assert!(!todo.completed);
/// # Ok(())
/// # }
/// ```

use crate::store::StoreError;

pub mod todo;
pub mod user;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A required field is missing or empty
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique key is already taken
    #[error("{0} already exists")]
    Uniqueness(String),

    /// The addressed record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Store failure
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => RepositoryError::Uniqueness(field.to_string()),
            other => RepositoryError::Store(other),
        }
    }
}

/// Repository result type alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
