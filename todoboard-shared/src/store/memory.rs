/// In-memory store
///
/// Each `MemoryStore` owns its own maps, so two instances never share state.
/// Tests build a fresh one per case; the API binary uses one when
/// `DATABASE_URL` is `memory://`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, StoreResult, TodoStore, UserStore};
use crate::models::todo::{NewTodo, Todo};
use crate::models::user::{NewUser, User};

/// Store backed by in-process hash maps
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    todos: RwLock<HashMap<Uuid, Todo>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.name == user.name) {
            return Err(StoreError::Duplicate("name"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_name(&self, name: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.name == name)
            .cloned())
    }

    async fn find_all_users(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn replace_user(&self, user: &User) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.id != user.id && u.name == user.name) {
            return Err(StoreError::Duplicate("name"));
        }

        let Some(stored) = users.get_mut(&user.id) else {
            return Ok(None);
        };
        *stored = User {
            updated_at: Utc::now(),
            created_at: stored.created_at,
            ..user.clone()
        };

        Ok(Some(stored.clone()))
    }

    async fn remove_user(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert_todo(&self, todo: NewTodo) -> StoreResult<Todo> {
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            title: todo.title,
            completed: todo.completed,
            owner_id: todo.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.todos.write().await.insert(todo.id, todo.clone());

        Ok(todo)
    }

    async fn find_todo_by_id(&self, id: Uuid) -> StoreResult<Option<Todo>> {
        Ok(self.todos.read().await.get(&id).cloned())
    }

    async fn find_all_todos(&self) -> StoreResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self.todos.read().await.values().cloned().collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(todos)
    }

    async fn replace_todo(&self, todo: &Todo) -> StoreResult<Option<Todo>> {
        let mut todos = self.todos.write().await;

        let Some(stored) = todos.get_mut(&todo.id) else {
            return Ok(None);
        };
        *stored = Todo {
            updated_at: Utc::now(),
            created_at: stored.created_at,
            ..todo.clone()
        };

        Ok(Some(stored.clone()))
    }

    async fn remove_todo(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.todos.write().await.remove(&id).is_some())
    }

    async fn remove_all_todos(&self) -> StoreResult<u64> {
        let mut todos = self.todos.write().await;
        let removed = todos.len() as u64;
        todos.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_user_rejects_duplicate_name() {
        let store = MemoryStore::new();
        store.insert_user(new_user("ademir")).await.unwrap();

        let err = store.insert_user(new_user("ademir")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("name")));
        assert_eq!(store.find_all_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_missing_todo_returns_none() {
        let store = MemoryStore::new();
        let todo = store
            .insert_todo(NewTodo {
                title: "Be awesome".to_string(),
                completed: false,
                owner_id: None,
            })
            .await
            .unwrap();

        assert!(store.remove_todo(todo.id).await.unwrap());
        assert!(store.replace_todo(&todo).await.unwrap().is_none());
        assert!(!store.remove_todo(todo.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_separate_instances_do_not_share_state() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        a.insert_user(new_user("ademir")).await.unwrap();

        assert!(b.find_user_by_name("ademir").await.unwrap().is_none());
    }
}
