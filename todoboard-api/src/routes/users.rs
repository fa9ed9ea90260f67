/// User endpoints
///
/// # Endpoints
///
/// - `GET /users` - List users (hashes never leave the server)
/// - `POST /users` - Register
/// - `PATCH /users/:name` - Change password
/// - `DELETE /users/:name` - Delete account
///
/// By default PATCH and DELETE accept any caller, matching the historical
/// behaviour of this API. With `USERS_REQUIRE_AUTH=true` they require the
/// target account's current password.

use crate::{
    app::AppState,
    error::ApiResult,
    routes::parse_body,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todoboard_shared::{auth::authenticator::AuthError, models::user::User};
use uuid::Uuid;
use validator::Validate;

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserView {
    /// User ID
    pub id: Uuid,

    /// Name
    pub name: String,

    /// Created at
    pub created_at: DateTime<Utc>,

    /// Updated at
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Single user response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// The user
    pub user: UserView,
}

/// Register request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Unique name
    #[validate(required(message = "Name is required"), length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    /// Plaintext password, hashed before storage
    #[validate(required(message = "Password is required"), length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,
}

/// Update user request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New password; absent leaves it unchanged
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,

    /// Current password (checked only when user administration requires auth)
    pub current_password: Option<String>,
}

/// Delete user request
#[derive(Debug, Default, Deserialize)]
pub struct DeleteUserRequest {
    /// Current password (checked only when user administration requires auth)
    pub password: Option<String>,
}

/// Re-verifies the target account when user administration requires it
async fn require_self(state: &AppState, name: &str, password: Option<&str>) -> ApiResult<()> {
    if !state.config.policy.users_require_auth {
        return Ok(());
    }

    let password = password.ok_or(AuthError::MissingCredentials)?;
    state.auth.authenticate(name, password).await?;
    Ok(())
}

/// List users
///
/// # Endpoint
///
/// ```text
/// GET /users
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserView>>> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "name": "ademir", "password": "123456" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing name or password, or name already taken
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let req: CreateUserRequest = parse_body(&body)?;
    req.validate()?;

    let name = req.name.as_deref().unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();

    let hash = state.hasher.hash(password).await?;
    let user = state.users.create(name, &hash).await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user: user.into() })))
}

/// Change a user's password
///
/// # Endpoint
///
/// ```text
/// PATCH /users/:name
/// Content-Type: application/json
///
/// { "password": "654321" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Unknown name
/// - `401 Unauthorized`: Wrong or missing `current_password` (hardened mode only)
pub async fn update_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<UserResponse>> {
    let req: UpdateUserRequest = parse_body(&body)?;
    req.validate()?;

    require_self(&state, &name, req.current_password.as_deref()).await?;
    let user = state.users.find_by_name(&name).await?;

    // absent password changes nothing, but the record is still saved
    let user = match req.password.as_deref() {
        Some(password) => {
            let hash = state.hasher.hash(password).await?;
            state.users.set_password(user, &hash).await?
        }
        None => state.users.save(user).await?,
    };

    Ok(Json(UserResponse { user: user.into() }))
}

/// Delete a user
///
/// Todos owned by the user are left in place.
///
/// # Endpoint
///
/// ```text
/// DELETE /users/:name
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Unknown name
/// - `401 Unauthorized`: Wrong or missing `password` (hardened mode only)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let req: DeleteUserRequest = parse_body(&body)?;

    require_self(&state, &name, req.password.as_deref()).await?;
    let user = state.users.find_by_name(&name).await?;
    state.users.delete(&user).await?;

    Ok(StatusCode::NO_CONTENT)
}
