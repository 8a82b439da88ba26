//! Row shapes as stored in PostgreSQL and their conversion into domain types.
//!
//! Enums are stored as text, so every conversion can fail when a row holds a
//! value the domain no longer knows about.
use chrono::{DateTime, Utc};
use theorydeck_shared::types::{EvidenceCard, Report, Theory, User, Vote, VoteStrength};
use uuid::Uuid;

use crate::errors::RepositoryError;

pub(super) const USER_COLUMNS: &str = "id, email, name, role, created_at";
pub(super) const THEORY_COLUMNS: &str =
    "id, slug, title, claim, tldr, realm, topic, tags, status, author_id, created_at, updated_at";
pub(super) const CARD_COLUMNS: &str =
    "id, theory_id, author_id, content, source, source_title, context, stance, status, created_at, updated_at";
pub(super) const VOTE_COLUMNS: &str = "id, card_id, user_id, strength, created_at, updated_at";
pub(super) const REPORT_COLUMNS: &str =
    "id, reporter_id, reason, details, theory_id, card_id, status, created_at, resolved_at";

#[derive(sqlx::FromRow)]
pub(super) struct UserRow {
    id: Uuid,
    email: String,
    name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct TheoryRow {
    id: Uuid,
    slug: String,
    title: String,
    claim: String,
    tldr: String,
    realm: Option<String>,
    topic: Option<String>,
    tags: Vec<String>,
    status: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TheoryRow> for Theory {
    type Error = RepositoryError;

    fn try_from(row: TheoryRow) -> Result<Self, Self::Error> {
        Ok(Theory {
            id: row.id,
            slug: row.slug,
            title: row.title,
            claim: row.claim,
            tldr: row.tldr,
            realm: row.realm,
            topic: row.topic,
            tags: row.tags,
            status: row.status.parse()?,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct CardRow {
    id: Uuid,
    theory_id: Uuid,
    author_id: Uuid,
    content: String,
    source: Option<String>,
    source_title: Option<String>,
    context: Option<String>,
    stance: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CardRow> for EvidenceCard {
    type Error = RepositoryError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        Ok(EvidenceCard {
            id: row.id,
            theory_id: row.theory_id,
            author_id: row.author_id,
            content: row.content,
            source: row.source,
            source_title: row.source_title,
            context: row.context,
            stance: row.stance.parse()?,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct VoteRow {
    id: Uuid,
    card_id: Uuid,
    user_id: Uuid,
    strength: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VoteRow> for Vote {
    type Error = RepositoryError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        Ok(Vote {
            id: row.id,
            card_id: row.card_id,
            user_id: row.user_id,
            strength: VoteStrength::try_from(i64::from(row.strength))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ReportRow {
    id: Uuid,
    reporter_id: Uuid,
    reason: String,
    details: Option<String>,
    theory_id: Option<Uuid>,
    card_id: Option<Uuid>,
    status: String,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReportRow> for Report {
    type Error = RepositoryError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(Report {
            id: row.id,
            reporter_id: row.reporter_id,
            reason: row.reason.parse()?,
            details: row.details,
            theory_id: row.theory_id,
            card_id: row.card_id,
            status: row.status.parse()?,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
        })
    }
}

/// Converts a batch of rows, failing on the first one that does not map.
pub(super) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, RepositoryError>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}
