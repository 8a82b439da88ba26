use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CardId, CardStatus, Stance, TheoryId, UserId};

/// A piece of evidence arguing for or against a theory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceCard {
    pub id: CardId,
    pub theory_id: TheoryId,
    pub author_id: UserId,
    pub content: String,
    pub source: Option<String>,
    pub source_title: Option<String>,
    pub context: Option<String>,
    pub stance: Stance,
    pub status: CardStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EvidenceCard {
    /// Only active cards are displayed and take part in scoring.
    pub fn is_active(&self) -> bool {
        self.status == CardStatus::Active
    }
}

#[derive(Debug, Clone)]
pub struct NewEvidenceCard {
    pub theory_id: TheoryId,
    pub author_id: UserId,
    pub content: String,
    pub source: Option<String>,
    pub source_title: Option<String>,
    pub context: Option<String>,
    pub stance: Stance,
}

/// Partial edit of a card's text. Stance is fixed once posted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceCardUpdate {
    pub content: Option<String>,
    pub source: Option<String>,
    pub source_title: Option<String>,
    pub context: Option<String>,
}
