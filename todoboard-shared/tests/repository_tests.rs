/// Repository and authentication behaviour against the in-memory store
///
/// These run without any external services.

use std::sync::Arc;

use todoboard_shared::auth::authenticator::{AuthError, Authenticator};
use todoboard_shared::auth::authorization::{authorize, AuthzError};
use todoboard_shared::auth::password::{CredentialHasher, HashParams};
use todoboard_shared::models::todo::TodoRepository;
use todoboard_shared::models::user::UserRepository;
use todoboard_shared::models::RepositoryError;
use todoboard_shared::store::MemoryStore;

struct Fixture {
    users: UserRepository,
    todos: TodoRepository,
    hasher: CredentialHasher,
    auth: Authenticator,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let hasher = CredentialHasher::new(HashParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("test params are valid");
    let users = UserRepository::new(store.clone());
    let todos = TodoRepository::new(store);
    let auth = Authenticator::new(users.clone(), hasher);

    Fixture {
        users,
        todos,
        hasher,
        auth,
    }
}

#[tokio::test]
async fn test_listings_start_empty() {
    let f = fixture();
    assert!(f.users.list().await.unwrap().is_empty());
    assert!(f.todos.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_name_does_not_increase_count() {
    let f = fixture();
    let hash = f.hasher.hash("123456").await.unwrap();
    f.users.create("ademir", &hash).await.unwrap();

    let err = f.users.create("ademir", &hash).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Uniqueness(_)));
    assert_eq!(f.users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_set_password_replaces_hash() {
    let f = fixture();
    let old_hash = f.hasher.hash("123456").await.unwrap();
    let user = f.users.create("ademir", &old_hash).await.unwrap();

    let new_hash = f.hasher.hash("654321").await.unwrap();
    let updated = f.users.set_password(user, &new_hash).await.unwrap();
    let stored = f.users.find_by_name("ademir").await.unwrap();

    assert_eq!(updated.password_hash, stored.password_hash);
    assert_ne!(stored.password_hash, old_hash);
    assert_ne!(stored.password_hash, "123456");
    assert_ne!(stored.password_hash, "654321");
    assert!(!f.hasher.verify(&stored.password_hash, "123456").await);
    assert!(f.hasher.verify(&stored.password_hash, "654321").await);

    assert!(matches!(
        f.auth.authenticate("ademir", "123456").await,
        Err(AuthError::BadCredentials)
    ));
    assert!(f.auth.authenticate("ademir", "654321").await.is_ok());
}

#[tokio::test]
async fn test_delete_user_twice_is_not_found() {
    let f = fixture();
    let hash = f.hasher.hash("123456").await.unwrap();
    let user = f.users.create("ademir", &hash).await.unwrap();

    f.users.delete(&user).await.unwrap();
    assert!(matches!(
        f.users.delete(&user).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert_eq!(f.users.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleting_user_orphans_their_todos() {
    let f = fixture();
    let hash = f.hasher.hash("123456").await.unwrap();
    let user = f.users.create("ademir", &hash).await.unwrap();
    let todo = f.todos.create("Be awesome", Some(user.id)).await.unwrap();

    f.users.delete(&user).await.unwrap();

    let orphan = f.todos.find_by_id(todo.id).await.unwrap();
    assert_eq!(orphan.owner_id, Some(user.id));
}

#[tokio::test]
async fn test_toggle_completed_both_ways() {
    let f = fixture();
    let todo = f.todos.create("Be awesome", None).await.unwrap();

    f.todos.set_completed(todo.clone(), true).await.unwrap();
    let done = f.todos.find_by_id(todo.id).await.unwrap();
    assert!(done.completed);

    // same value again leaves the state unchanged
    f.todos.set_completed(done.clone(), true).await.unwrap();
    assert!(f.todos.find_by_id(todo.id).await.unwrap().completed);

    f.todos.set_completed(done, false).await.unwrap();
    let undone = f.todos.find_by_id(todo.id).await.unwrap();
    assert!(!undone.completed);
    assert_eq!(undone.title, "Be awesome");
}

#[tokio::test]
async fn test_delete_todo_restores_count() {
    let f = fixture();
    let before = f.todos.count().await.unwrap();
    let todo = f.todos.create("Be awesome", None).await.unwrap();
    assert_eq!(f.todos.count().await.unwrap(), before + 1);

    f.todos.delete(&todo).await.unwrap();
    assert_eq!(f.todos.count().await.unwrap(), before);
    assert!(matches!(
        f.todos.find_by_id(todo.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        f.todos.set_completed(todo, true).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_clear_removes_every_todo() {
    let f = fixture();
    f.todos.create("one", None).await.unwrap();
    f.todos.create("two", None).await.unwrap();

    assert_eq!(f.todos.clear().await.unwrap(), 2);
    assert_eq!(f.todos.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_authenticate_then_authorize() {
    let f = fixture();
    let hash = f.hasher.hash("123456").await.unwrap();
    let ademir = f.users.create("ademir", &hash).await.unwrap();
    let other_hash = f.hasher.hash("abcdef").await.unwrap();
    f.users.create("bruna", &other_hash).await.unwrap();

    let todo = f.todos.create("Be awesome", Some(ademir.id)).await.unwrap();

    let owner = f.auth.authenticate("ademir", "123456").await.unwrap();
    assert!(authorize(&todo, Some(&owner)).is_ok());

    let stranger = f.auth.authenticate("bruna", "abcdef").await.unwrap();
    assert_eq!(
        authorize(&todo, Some(&stranger)),
        Err(AuthzError::NotOwner(todo.id))
    );
}
