/// Todo model and repository
///
/// A todo is created active with `completed = false`, can be toggled any number
/// of times in either direction, and is gone for good once deleted.
///
/// `owner_id` is only ever stamped from an authenticated principal. The store
/// does not enforce that it points at an existing user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RepositoryError, RepositoryResult};
use crate::store::TodoStore;

/// Shared task list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Store-assigned id
    pub id: Uuid,

    /// What needs doing
    pub title: String,

    /// Whether it is done
    pub completed: bool,

    /// Owning user, if the todo was created with credentials
    pub owner_id: Option<Uuid>,

    /// When the todo was created
    pub created_at: DateTime<Utc>,

    /// When the todo was last written
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a todo
#[derive(Debug, Clone)]
pub struct NewTodo {
    /// Title (validated non-empty before insert)
    pub title: String,

    /// Initial completion state
    pub completed: bool,

    /// Owning user
    pub owner_id: Option<Uuid>,
}

/// Repository for [`Todo`] records
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn TodoStore>,
}

impl TodoRepository {
    /// Creates a repository over `store`
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Creates an incomplete todo
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `title` is empty.
    pub async fn create(&self, title: &str, owner_id: Option<Uuid>) -> RepositoryResult<Todo> {
        if title.trim().is_empty() {
            return Err(RepositoryError::Validation("Missing title".to_string()));
        }

        let todo = self
            .store
            .insert_todo(NewTodo {
                title: title.to_string(),
                completed: false,
                owner_id,
            })
            .await?;

        tracing::info!(todo_id = %todo.id, owner_id = ?todo.owner_id, "Todo created");
        Ok(todo)
    }

    /// Finds a todo by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no todo has that id.
    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Todo> {
        self.store
            .find_todo_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Todo {}", id)))
    }

    /// Lists all todos, oldest first
    pub async fn list(&self) -> RepositoryResult<Vec<Todo>> {
        Ok(self.store.find_all_todos().await?)
    }

    /// Counts todos
    pub async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.store.find_all_todos().await?.len())
    }

    /// Sets the completion state of `todo` and persists it
    ///
    /// Writing the current value again is allowed and still saves.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the todo was deleted in the meantime.
    pub async fn set_completed(&self, todo: Todo, completed: bool) -> RepositoryResult<Todo> {
        let updated = Todo { completed, ..todo };

        let stored = self
            .store
            .replace_todo(&updated)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Todo {}", updated.id)))?;

        tracing::debug!(todo_id = %stored.id, completed = stored.completed, "Todo saved");
        Ok(stored)
    }

    /// Deletes `todo`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record is already gone.
    pub async fn delete(&self, todo: &Todo) -> RepositoryResult<()> {
        if !self.store.remove_todo(todo.id).await? {
            return Err(RepositoryError::NotFound(format!("Todo {}", todo.id)));
        }

        tracing::info!(todo_id = %todo.id, "Todo deleted");
        Ok(())
    }

    /// Removes every todo
    ///
    /// Test harness helper; no HTTP route reaches it.
    pub async fn clear(&self) -> RepositoryResult<u64> {
        let removed = self.store.remove_all_todos().await?;
        tracing::warn!(removed, "All todos cleared");
        Ok(removed)
    }
}
