use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use theorydeck_service::{TheoryDetail, TheoryInput, TheoryPage};
use theorydeck_shared::types::{Theory, TheoryFilter, TheoryId, TheoryStatus, TheoryUpdate};

use crate::errors::ApiError;
use crate::server::auth::{CurrentUser, MaybeUser};
use crate::server::extract::{ApiJson, ApiPath, ApiQuery};
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListTheoriesQuery {
    pub status: Option<TheoryStatus>,
    pub realm: Option<String>,
    pub topic: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<ListTheoriesQuery> for TheoryFilter {
    fn from(query: ListTheoriesQuery) -> Self {
        let blank_to_none = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        TheoryFilter {
            status: query.status,
            realm: blank_to_none(query.realm),
            topic: blank_to_none(query.topic),
            search: blank_to_none(query.search),
            page: query.page.unwrap_or(0),
            limit: query
                .limit
                .unwrap_or(TheoryFilter::DEFAULT_LIMIT)
                .clamp(1, TheoryFilter::MAX_LIMIT),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: TheoryStatus,
}

/// `GET /theories`
pub async fn list_theories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTheoriesQuery>,
) -> Result<Json<TheoryPage>, ApiError> {
    let filter = TheoryFilter::from(query);
    Ok(Json(state.theories.list(&filter).await?))
}

/// `POST /theories`
pub async fn create_theory(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiJson(input): ApiJson<TheoryInput>,
) -> Result<(StatusCode, Json<Theory>), ApiError> {
    let theory = state.theories.create(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(theory)))
}

/// `GET /theories/:slug`
pub async fn get_theory(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<TheoryDetail>, ApiError> {
    let detail = state.theories.get_by_slug(&slug, caller.as_ref()).await?;
    Ok(Json(detail))
}

/// `PATCH /theories/:id`
pub async fn update_theory(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<TheoryId>,
    ApiJson(update): ApiJson<TheoryUpdate>,
) -> Result<Json<Theory>, ApiError> {
    Ok(Json(state.theories.update(&caller, id, update).await?))
}

/// `DELETE /theories/:id`
pub async fn delete_theory(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<TheoryId>,
) -> Result<Json<Theory>, ApiError> {
    Ok(Json(state.theories.delete(&caller, id).await?))
}

/// `PATCH /theories/:id/status`
pub async fn set_theory_status(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<TheoryId>,
    ApiJson(body): ApiJson<StatusRequest>,
) -> Result<Json<Theory>, ApiError> {
    Ok(Json(state.theories.set_status(&caller, id, body.status).await?))
}
