/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todoboard_api::{app::AppState, config::Config};
/// use todoboard_shared::store::MemoryStore;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config)?;
/// let app = todoboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use todoboard_shared::{
    auth::{
        authenticator::Authenticator,
        password::{CredentialHasher, PasswordError},
    },
    models::{todo::TodoRepository, user::UserRepository},
    store::{TodoStore, UserStore},
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Every field
/// is a cheap handle; there is no per-process mutable state here.
#[derive(Clone)]
pub struct AppState {
    /// User records
    pub users: UserRepository,

    /// Todo records
    pub todos: TodoRepository,

    /// Per-request credential check
    pub auth: Authenticator,

    /// Hasher for new and changed passwords
    pub hasher: CredentialHasher,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state over a store that holds both entities
    ///
    /// # Errors
    ///
    /// Returns an error if the configured hash parameters are invalid.
    pub fn new<S>(store: Arc<S>, config: Config) -> Result<Self, PasswordError>
    where
        S: UserStore + TodoStore + 'static,
    {
        let hasher = CredentialHasher::new(config.hasher.into())?;
        let users = UserRepository::new(store.clone());
        let todos = TodoRepository::new(store);

        Ok(Self {
            auth: Authenticator::new(users.clone(), hasher),
            users,
            todos,
            hasher,
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router
///
/// ```text
/// /
/// ├── /todos
/// │   ├── GET    /        # List todos (public)
/// │   ├── POST   /        # Create todo
/// │   ├── PATCH  /:id     # Toggle completed (owner only)
/// │   └── DELETE /:id     # Delete (owner only)
/// └── /users
///     ├── GET    /        # List users (public)
///     ├── POST   /        # Register
///     ├── PATCH  /:name   # Change password
///     └── DELETE /:name   # Delete account
/// ```
///
/// Credentials travel in the JSON body of each mutating request; there is no
/// auth middleware layer.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let todo_routes = Router::new()
        .route("/", get(routes::todos::list_todos).post(routes::todos::create_todo))
        .route(
            "/:id",
            patch(routes::todos::update_todo).delete(routes::todos::delete_todo),
        );

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users).post(routes::users::create_user))
        .route(
            "/:name",
            patch(routes::users::update_user).delete(routes::users::delete_user),
        );

    Router::new()
        .nest("/todos", todo_routes)
        .nest("/users", user_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
