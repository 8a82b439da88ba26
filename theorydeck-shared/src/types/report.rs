use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CardId, ReportId, ReportReason, ReportStatus, TheoryId, UserId};

/// A user's complaint about a theory or an evidence card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub reporter_id: UserId,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub theory_id: Option<TheoryId>,
    pub card_id: Option<CardId>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub reporter_id: UserId,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub theory_id: Option<TheoryId>,
    pub card_id: Option<CardId>,
}

/// Content action a moderator can take while handling a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationAction {
    /// Soft-delete the reported card, or take down the reported theory.
    Delete,
    /// Hide the reported card from display and scoring.
    Hide,
    /// Mark the reported card for further review.
    Flag,
}
