/// API route handlers
///
/// - `todos`: shared task list, mutations guarded by ownership
/// - `users`: registration and account administration
///
/// Handlers read the raw body and decode it with [`parse_body`], so an empty
/// body counts as `{}` and malformed JSON is a plain 400.

use crate::error::{ApiError, ApiResult, ValidationErrorDetail};
use axum::body::Bytes;
use serde::de::DeserializeOwned;

pub mod todos;
pub mod users;

/// Decodes an optional JSON body
pub(crate) fn parse_body<T>(body: &Bytes) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
}

/// Pairs up the optional `name`/`password` body fields
///
/// Both or neither must be present.
pub(crate) fn credentials<'a>(
    name: &'a Option<String>,
    password: &'a Option<String>,
) -> ApiResult<Option<(&'a str, &'a str)>> {
    match (name.as_deref(), password.as_deref()) {
        (Some(name), Some(password)) => Ok(Some((name, password))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(missing_field("password")),
        (None, Some(_)) => Err(missing_field("name")),
    }
}

fn missing_field(field: &str) -> ApiError {
    ApiError::ValidationError(vec![ValidationErrorDetail {
        field: field.to_string(),
        message: "name and password must be supplied together".to_string(),
    }])
}
