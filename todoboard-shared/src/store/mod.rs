/// Persistence seam for users and todos
///
/// The repositories never talk to a database directly. They go through the
/// [`UserStore`] and [`TodoStore`] traits, which expose the small document-style
/// surface the application needs: insert, lookup by id, equality lookup by user
/// name, listing, whole-record replace and removal.
///
/// # Backends
///
/// - [`postgres::PgStore`]: PostgreSQL via sqlx, used in production
/// - [`memory::MemoryStore`]: instance-owned maps, used by tests and `memory://`
///
/// Replace is last-write-wins on both backends. Atomicity is per record and
/// nothing here orders concurrent writers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::todo::{NewTodo, Todo};
use crate::models::user::{NewUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique key already exists (carries the field name)
    #[error("Duplicate value for unique field '{0}'")]
    Duplicate(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user; the store assigns id and timestamps
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    /// Looks a user up by id
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Looks a user up by exact name
    async fn find_user_by_name(&self, name: &str) -> StoreResult<Option<User>>;

    /// Lists every user, oldest first
    async fn find_all_users(&self) -> StoreResult<Vec<User>>;

    /// Replaces the stored record with `user`, returning the stored result
    ///
    /// `None` means no record with that id exists.
    async fn replace_user(&self, user: &User) -> StoreResult<Option<User>>;

    /// Removes a user, returning whether a record was removed
    async fn remove_user(&self, id: Uuid) -> StoreResult<bool>;
}

/// Persistence operations for todo records
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Inserts a todo; the store assigns id and timestamps
    async fn insert_todo(&self, todo: NewTodo) -> StoreResult<Todo>;

    /// Looks a todo up by id
    async fn find_todo_by_id(&self, id: Uuid) -> StoreResult<Option<Todo>>;

    /// Lists every todo, oldest first
    async fn find_all_todos(&self) -> StoreResult<Vec<Todo>>;

    /// Replaces the stored record with `todo`, returning the stored result
    ///
    /// `None` means no record with that id exists.
    async fn replace_todo(&self, todo: &Todo) -> StoreResult<Option<Todo>>;

    /// Removes a todo, returning whether a record was removed
    async fn remove_todo(&self, id: Uuid) -> StoreResult<bool>;

    /// Removes every todo, returning how many were removed
    async fn remove_all_todos(&self) -> StoreResult<u64>;
}
