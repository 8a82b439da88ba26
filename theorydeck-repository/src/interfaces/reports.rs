use chrono::{DateTime, Utc};
use theorydeck_shared::types::{NewReport, Report, ReportId, ReportStatus};

use crate::errors::RepositoryError;

/// A trait that defines the interface for persisting content reports.
#[async_trait::async_trait]
pub trait ReportRepository: Send + Sync {
    /// Inserts a report with status `PENDING`.
    async fn create_report(&self, report: &NewReport) -> Result<Report, RepositoryError>;

    async fn get_report(&self, id: ReportId) -> Result<Option<Report>, RepositoryError>;

    /// Lists reports newest first, optionally restricted to one status.
    async fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, RepositoryError>;

    async fn update_report_status(
        &self,
        id: ReportId,
        status: ReportStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Report>, RepositoryError>;
}
