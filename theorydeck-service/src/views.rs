//! Read models returned by the services, shaped for JSON responses.
use serde::Serialize;
use theorydeck_scoring::ConfidenceLevel;
use theorydeck_shared::types::{
    CardVoteStats, EvidenceCard, Theory, TheoryVoteStats, User, UserId, VoteStrength,
};

/// Public face of a theory or card author. Email and role stay private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorView {
    pub id: UserId,
    pub name: Option<String>,
}

impl AuthorView {
    /// Placeholder for an author id that no longer resolves to a user.
    pub fn unknown(id: UserId) -> Self {
        Self { id, name: None }
    }
}

impl From<&User> for AuthorView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// An evidence card annotated with its live vote statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    #[serde(flatten)]
    pub card: EvidenceCard,
    pub author: AuthorView,
    pub vote_stats: CardVoteStats,
    /// The caller's own strength on this card, `null` for anonymous callers
    /// or when they have not voted.
    pub user_vote: Option<VoteStrength>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoryDetail {
    #[serde(flatten)]
    pub theory: Theory,
    pub author: AuthorView,
    pub evidence_cards: Vec<CardView>,
    pub vote_stats: TheoryVoteStats,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TheorySummary {
    #[serde(flatten)]
    pub theory: Theory,
    pub author: AuthorView,
    pub evidence_count: u32,
    pub vote_stats: TheoryVoteStats,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoryPage {
    pub theories: Vec<TheorySummary>,
    pub has_more: bool,
    pub total_count: u64,
    pub page: u32,
}
