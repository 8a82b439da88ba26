//! Content reports and their moderation.
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use theorydeck_repository::{EvidenceRepository, ReportRepository, Store, TheoryRepository};
use theorydeck_shared::permissions::can_resolve_report;
use theorydeck_shared::types::{
    CardId, CardStatus, ModerationAction, NewReport, Report, ReportId, ReportReason, ReportStatus,
    TheoryId, TheoryStatus, User,
};
use tracing::info;

use crate::errors::ServiceError;

/// Body of a report submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub reason: Option<ReportReason>,
    pub details: Option<String>,
    pub theory_id: Option<TheoryId>,
    pub card_id: Option<CardId>,
}

/// A moderator's decision on a report.
///
/// `action` takes precedence over `status` when both are given, since acting
/// on content settles the report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportResolution {
    pub status: Option<ReportStatus>,
    pub action: Option<ModerationAction>,
}

pub struct ReportService {
    store: Arc<dyn Store>,
}

impl ReportService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn require_moderator(caller: &User) -> Result<(), ServiceError> {
        if can_resolve_report(caller.role) {
            Ok(())
        } else {
            Err(ServiceError::forbidden("Moderator rights required"))
        }
    }

    /// Files a report against a theory, a card, or both.
    pub async fn create(&self, caller: &User, input: ReportInput) -> Result<Report, ServiceError> {
        let reason = input
            .reason
            .ok_or_else(|| ServiceError::bad_request("Report reason is required"))?;
        if input.theory_id.is_none() && input.card_id.is_none() {
            return Err(ServiceError::bad_request(
                "A theory or an evidence card must be reported",
            ));
        }
        if let Some(theory_id) = input.theory_id {
            if self.store.get_theory(theory_id).await?.is_none() {
                return Err(ServiceError::NotFound("Theory"));
            }
        }
        if let Some(card_id) = input.card_id {
            if self.store.get_card(card_id).await?.is_none() {
                return Err(ServiceError::NotFound("Evidence card"));
            }
        }

        let report = self
            .store
            .create_report(&NewReport {
                reporter_id: caller.id,
                reason,
                details: input
                    .details
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
                theory_id: input.theory_id,
                card_id: input.card_id,
            })
            .await?;

        info!(report_id = %report.id, reason = %reason, reporter_id = %caller.id, "Report filed");
        Ok(report)
    }

    pub async fn list(&self, caller: &User, status: Option<ReportStatus>) -> Result<Vec<Report>, ServiceError> {
        Self::require_moderator(caller)?;
        Ok(self.store.list_reports(status).await?)
    }

    /// Applies a moderator decision.
    ///
    /// | action | target | content becomes | report becomes |
    /// |---|---|---|---|
    /// | `DELETE` | card | `DELETED` | `RESOLVED` |
    /// | `DELETE` | theory | `MODERATED` | `RESOLVED` |
    /// | `HIDE` | card | `HIDDEN` | `RESOLVED` |
    /// | `FLAG` | card | `FLAGGED` | `REVIEWED` |
    ///
    /// Without an applicable action the requested `status` is applied as is.
    /// `RESOLVED` and `DISMISSED` stamp `resolved_at`.
    pub async fn resolve(
        &self,
        caller: &User,
        id: ReportId,
        resolution: ReportResolution,
    ) -> Result<Report, ServiceError> {
        Self::require_moderator(caller)?;
        let report = self
            .store
            .get_report(id)
            .await?
            .ok_or(ServiceError::NotFound("Report"))?;

        let mut status = resolution.status;
        match (resolution.action, report.card_id, report.theory_id) {
            (Some(ModerationAction::Delete), Some(card_id), _) => {
                self.store.set_card_status(card_id, CardStatus::Deleted).await?;
                status = Some(ReportStatus::Resolved);
            }
            (Some(ModerationAction::Delete), None, Some(theory_id)) => {
                self.store
                    .set_theory_status(theory_id, TheoryStatus::Moderated)
                    .await?;
                status = Some(ReportStatus::Resolved);
            }
            (Some(ModerationAction::Hide), Some(card_id), _) => {
                self.store.set_card_status(card_id, CardStatus::Hidden).await?;
                status = Some(ReportStatus::Resolved);
            }
            (Some(ModerationAction::Flag), Some(card_id), _) => {
                self.store.set_card_status(card_id, CardStatus::Flagged).await?;
                status = Some(ReportStatus::Reviewed);
            }
            (Some(action), _, _) => {
                return Err(ServiceError::bad_request(format!(
                    "Action {action:?} does not apply to this report"
                )));
            }
            (None, _, _) => {}
        }

        let Some(status) = status else {
            return Err(ServiceError::bad_request("A status or an action is required"));
        };
        let resolved_at = status.is_terminal().then(Utc::now);
        let updated = self
            .store
            .update_report_status(id, status, resolved_at)
            .await?
            .ok_or(ServiceError::NotFound("Report"))?;

        info!(report_id = %id, status = %status, moderator_id = %caller.id, "Report updated");
        Ok(updated)
    }
}
