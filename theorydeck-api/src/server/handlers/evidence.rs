use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use theorydeck_service::EvidenceInput;
use theorydeck_shared::types::{CardId, EvidenceCard, EvidenceCardUpdate};

use crate::errors::ApiError;
use crate::server::auth::CurrentUser;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

/// `POST /evidence-cards`
pub async fn create_card(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiJson(input): ApiJson<EvidenceInput>,
) -> Result<(StatusCode, Json<EvidenceCard>), ApiError> {
    let card = state.evidence.create(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// `PATCH /evidence-cards/:id`
pub async fn update_card(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<CardId>,
    ApiJson(update): ApiJson<EvidenceCardUpdate>,
) -> Result<Json<EvidenceCard>, ApiError> {
    Ok(Json(state.evidence.update(&caller, id, update).await?))
}

/// `DELETE /evidence-cards/:id`
pub async fn delete_card(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<CardId>,
) -> Result<Json<EvidenceCard>, ApiError> {
    Ok(Json(state.evidence.delete(&caller, id).await?))
}
