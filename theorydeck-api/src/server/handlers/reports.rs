use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use theorydeck_service::{ReportInput, ReportResolution};
use theorydeck_shared::types::{Report, ReportId, ReportStatus};

use crate::errors::ApiError;
use crate::server::auth::CurrentUser;
use crate::server::extract::{ApiJson, ApiPath, ApiQuery};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListReportsQuery {
    pub status: Option<ReportStatus>,
}

/// `POST /reports`
pub async fn create_report(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiJson(input): ApiJson<ReportInput>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let report = state.reports.create(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// `GET /reports`
pub async fn list_reports(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiQuery(query): ApiQuery<ListReportsQuery>,
) -> Result<Json<Vec<Report>>, ApiError> {
    Ok(Json(state.reports.list(&caller, query.status).await?))
}

/// `PATCH /reports/:id`
pub async fn resolve_report(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<ReportId>,
    ApiJson(resolution): ApiJson<ReportResolution>,
) -> Result<Json<Report>, ApiError> {
    Ok(Json(state.reports.resolve(&caller, id, resolution).await?))
}
