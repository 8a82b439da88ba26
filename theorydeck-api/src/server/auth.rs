//! Caller identity.
//!
//! Authentication happens upstream: a trusted gateway verifies the session
//! and forwards the user id in the `x-user-id` header. These extractors only
//! resolve that id to a stored user, so roles always come from the database.
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use theorydeck_shared::types::User;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::server::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. Rejects with 401 when the header is missing,
/// malformed, or names an unknown user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The caller if one is identified, for endpoints that also serve anonymous
/// readers. A header that is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

async fn resolve_caller(parts: &Parts, state: &AppState) -> Result<Option<User>, ApiError> {
    let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let id = raw
        .to_str()
        .ok()
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or(ApiError::Unauthorized)?;

    match state.users.find(id).await? {
        Some(user) => Ok(Some(user)),
        None => Err(ApiError::Unauthorized),
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_caller(parts, state)
            .await?
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_caller(parts, state).await?))
    }
}
