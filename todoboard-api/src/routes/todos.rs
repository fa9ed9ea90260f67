/// Todo endpoints
///
/// # Endpoints
///
/// - `GET /todos` - List every todo
/// - `POST /todos` - Create a todo, owned when credentials are supplied
/// - `PATCH /todos/:id` - Set `completed`
/// - `DELETE /todos/:id` - Delete
///
/// Mutations of an existing todo run in a fixed order: resolve the todo,
/// authenticate, check ownership, then write. Ownership is never looked at
/// before the credentials have been proven.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{credentials, parse_body},
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use todoboard_shared::{
    auth::{
        authenticator::{AuthError, Principal},
        authorization::authorize,
    },
    models::todo::Todo,
};
use uuid::Uuid;
use validator::Validate;

/// Create todo request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateTodoRequest {
    /// Title
    #[validate(required(message = "Title is required"), length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    /// Owner name
    pub name: Option<String>,

    /// Owner password
    pub password: Option<String>,
}

/// Update todo request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// New completion state; absent leaves it unchanged
    pub completed: Option<bool>,

    /// Caller name
    pub name: Option<String>,

    /// Caller password
    pub password: Option<String>,
}

/// Delete todo request
#[derive(Debug, Default, Deserialize)]
pub struct DeleteTodoRequest {
    /// Caller name
    pub name: Option<String>,

    /// Caller password
    pub password: Option<String>,
}

/// Single todo response
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    /// The todo
    pub todo: Todo,
}

/// Parses a path id; anything that is not a UUID cannot name a todo
fn parse_todo_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("Todo {} not found", raw)))
}

/// Resolves a todo and authenticates/authorizes the caller against it
async fn guarded_todo(
    state: &AppState,
    raw_id: &str,
    name: &Option<String>,
    password: &Option<String>,
) -> ApiResult<(Todo, Option<Principal>)> {
    let creds = credentials(name, password)?;
    let todo = state.todos.find_by_id(parse_todo_id(raw_id)?).await?;

    let principal = state.auth.authenticate_optional(creds).await?;
    authorize(&todo, principal.as_ref())?;

    Ok((todo, principal))
}

/// List todos
///
/// # Endpoint
///
/// ```text
/// GET /todos
/// ```
///
/// # Response
///
/// `200 OK` with a JSON array, possibly empty.
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(state.todos.list().await?))
}

/// Create todo
///
/// # Endpoint
///
/// ```text
/// POST /todos
/// Content-Type: application/json
///
/// { "title": "Be awesome", "name": "ademir", "password": "123456" }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "todo": { ... } }`. The todo is owned by the
/// authenticated user when credentials were supplied.
///
/// # Errors
///
/// - `400 Bad Request`: Missing or empty title, or only one of name/password
/// - `401 Unauthorized`: Bad credentials, or none while credentials are required
pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    let req: CreateTodoRequest = parse_body(&body)?;
    req.validate()?;

    let creds = credentials(&req.name, &req.password)?;
    if creds.is_none() && state.config.policy.todos_require_auth {
        return Err(AuthError::MissingCredentials.into());
    }

    let principal = state.auth.authenticate_optional(creds).await?;
    let title = req.title.as_deref().unwrap_or_default();
    let todo = state
        .todos
        .create(title, principal.map(|p| p.user_id))
        .await?;

    Ok((StatusCode::CREATED, Json(TodoResponse { todo })))
}

/// Update todo
///
/// # Endpoint
///
/// ```text
/// PATCH /todos/:id
/// Content-Type: application/json
///
/// { "completed": true, "name": "ademir", "password": "123456" }
/// ```
///
/// The record is saved even when `completed` is absent.
///
/// # Errors
///
/// - `404 Not Found`: Unknown id
/// - `401 Unauthorized`: Bad credentials, or none on an owned todo
/// - `403 Forbidden`: Authenticated as someone other than the owner
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<TodoResponse>> {
    let req: UpdateTodoRequest = parse_body(&body)?;
    let (todo, _) = guarded_todo(&state, &id, &req.name, &req.password).await?;

    let completed = req.completed.unwrap_or(todo.completed);
    let todo = state.todos.set_completed(todo, completed).await?;

    Ok(Json(TodoResponse { todo }))
}

/// Delete todo
///
/// # Endpoint
///
/// ```text
/// DELETE /todos/:id
/// Content-Type: application/json
///
/// { "name": "ademir", "password": "123456" }
/// ```
///
/// # Response
///
/// `204 No Content`
///
/// # Errors
///
/// Same as update.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let req: DeleteTodoRequest = parse_body(&body)?;
    let (todo, principal) = guarded_todo(&state, &id, &req.name, &req.password).await?;

    state.todos.delete(&todo).await?;
    tracing::debug!(
        todo_id = %todo.id,
        by = ?principal.map(|p| p.user_id),
        "Todo removed via API"
    );

    Ok(StatusCode::NO_CONTENT)
}
