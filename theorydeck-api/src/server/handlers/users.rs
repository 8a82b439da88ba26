use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use theorydeck_service::RegisterInput;
use theorydeck_shared::types::{User, UserId, UserRole, UserUpdate};

use crate::errors::ApiError;
use crate::server::auth::CurrentUser;
use crate::server::extract::{ApiJson, ApiPath, ApiQuery};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
}

/// `POST /users`
///
/// Registration is open: the gateway creates the account on first sign-in
/// and uses the returned id from then on.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users`
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list(&caller, query.role).await?))
}

/// `PATCH /users/:id`
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update(&caller, id, update).await?))
}
