use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use theorydeck_service::ServiceError;
use theorydeck_shared::types::{CardId, Vote};
use theorydeck_shared::ValidationErrors;
use tracing::instrument;

use crate::errors::ApiError;
use crate::server::auth::CurrentUser;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

/// `strength` is taken as raw JSON so a wrong type is reported against the
/// field rather than as a malformed body.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub strength: Value,
}

/// Body of the card-less vote endpoint, which names the card in the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVoteRequest {
    pub card_id: CardId,
    #[serde(default)]
    pub strength: Value,
}

/// Accepts integers and integral floats (`5.0`); range checks happen in the
/// vote service.
fn strength_from_json(raw: &Value) -> Result<i64, ApiError> {
    raw.as_i64()
        .or_else(|| {
            raw.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add("strength", "Strength must be one of 0, 2, 5, 8, or 10");
            ApiError::Service(ServiceError::Validation(errors))
        })
}

#[derive(Debug, Serialize)]
pub struct RemoveVoteResponse {
    pub removed: bool,
}

/// `POST /evidence-cards/:id/vote`
#[instrument(skip_all, fields(card_id = %card_id))]
pub async fn submit_vote(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(card_id): ApiPath<CardId>,
    ApiJson(body): ApiJson<VoteRequest>,
) -> Result<Json<Vote>, ApiError> {
    let strength = strength_from_json(&body.strength)?;
    let vote = state.votes.submit_vote(card_id, &caller, strength).await?;
    Ok(Json(vote))
}

/// `POST /votes`
pub async fn submit_vote_by_body(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiJson(body): ApiJson<CardVoteRequest>,
) -> Result<Json<Vote>, ApiError> {
    let strength = strength_from_json(&body.strength)?;
    let vote = state.votes.submit_vote(body.card_id, &caller, strength).await?;
    Ok(Json(vote))
}

/// `DELETE /evidence-cards/:id/vote`
#[instrument(skip_all, fields(card_id = %card_id))]
pub async fn remove_vote(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(card_id): ApiPath<CardId>,
) -> Result<Json<RemoveVoteResponse>, ApiError> {
    let removed = state.votes.remove_vote(card_id, &caller).await?;
    Ok(Json(RemoveVoteResponse { removed }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strength_from_json() {
        assert_eq!(strength_from_json(&json!(8)).unwrap(), 8);
        assert_eq!(strength_from_json(&json!(5.0)).unwrap(), 5);
        // Out-of-scale integers pass through for the service to reject.
        assert_eq!(strength_from_json(&json!(7)).unwrap(), 7);

        for raw in [json!("5"), json!(5.5), json!(null), json!([5]), json!(true)] {
            let err = strength_from_json(&raw).unwrap_err();
            assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
            match err {
                ApiError::Service(ServiceError::Validation(errors)) => {
                    assert!(errors.get("strength").is_some(), "{raw}")
                }
                other => panic!("unexpected error for {raw}: {other:?}"),
            }
        }
    }
}
