use async_trait::async_trait;
use chrono::{DateTime, Utc};
use theorydeck_shared::types::{NewReport, Report, ReportId, ReportStatus};
use uuid::Uuid;

use super::rows::{ReportRow, REPORT_COLUMNS};
use super::{rows, PostgresStore};
use crate::{ReportRepository, RepositoryError};

#[async_trait]
impl ReportRepository for PostgresStore {
    async fn create_report(&self, report: &NewReport) -> Result<Report, RepositoryError> {
        let row: ReportRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO reports (id, reporter_id, reason, details, theory_id, card_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(report.reporter_id)
        .bind(report.reason.as_str())
        .bind(&report.details)
        .bind(report.theory_id)
        .bind(report.card_id)
        .bind(ReportStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Report::try_from(row)
    }

    async fn get_report(&self, id: ReportId) -> Result<Option<Report>, RepositoryError> {
        let row: Option<ReportRow> =
            sqlx::query_as(&format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Report::try_from).transpose()
    }

    async fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, RepositoryError> {
        let rows: Vec<ReportRow> = sqlx::query_as(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE ($1::text IS NULL OR status = $1) ORDER BY created_at DESC"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows::convert_all(rows)
    }

    async fn update_report_status(
        &self,
        id: ReportId,
        status: ReportStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Report>, RepositoryError> {
        let row: Option<ReportRow> = sqlx::query_as(&format!(
            r#"
            UPDATE reports SET
                status = $2,
                resolved_at = COALESCE($3, resolved_at)
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(resolved_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Report::try_from).transpose()
    }
}
