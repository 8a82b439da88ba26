//! In-process implementation of every repository trait.
//!
//! Backs the HTTP tests and `STORE_BACKEND=memory` runs. All state sits
//! behind a single `tokio::sync::RwLock`, which makes each trait call atomic
//! in the same way a single SQL statement is. Listings are returned newest
//! first by walking insertion order backwards.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use theorydeck_shared::types::{
    CardId, CardStatus, EvidenceCard, EvidenceCardUpdate, NewEvidenceCard, NewReport, NewTheory,
    NewUser, Page, Report, ReportId, ReportStatus, Theory, TheoryFilter, TheoryId, TheoryStatus,
    TheoryUpdate, User, UserId, UserRole, UserUpdate, Vote, VoteStrength,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::{
    EvidenceRepository, ReportRepository, TheoryRepository, UserRepository, VoteRepository,
};

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    theories: Vec<Theory>,
    cards: Vec<EvidenceCard>,
    votes: HashMap<(UserId, CardId), Vote>,
    reports: Vec<Report>,
}

/// Volatile store keeping everything in process memory.
///
/// Cloning is cheap and clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(theory: &Theory, needle: &str) -> bool {
    let lowered = needle.to_lowercase();
    theory.title.to_lowercase().contains(&lowered)
        || theory.claim.to_lowercase().contains(&lowered)
        || theory.tags.iter().any(|tag| tag == needle)
}

fn matches_filter(theory: &Theory, filter: &TheoryFilter) -> bool {
    if theory.status != filter.effective_status() {
        return false;
    }
    if let Some(realm) = &filter.realm {
        if theory.realm.as_ref() != Some(realm) {
            return false;
        }
    }
    if let Some(topic) = &filter.topic {
        if theory.topic.as_ref() != Some(topic) {
            return false;
        }
    }
    match filter.search.as_deref().map(str::trim) {
        Some(needle) if !needle.is_empty() => matches_search(theory, needle),
        _ => true,
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::conflict("user with this email already exists"));
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: Utc::now(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
    }

    async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .rev()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect())
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Option<User>, RepositoryError> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(name) = &update.name {
            user.name = Some(name.clone());
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl TheoryRepository for MemoryStore {
    async fn create_theory(&self, theory: &NewTheory) -> Result<Theory, RepositoryError> {
        let mut state = self.state.write().await;
        if state.theories.iter().any(|t| t.slug == theory.slug) {
            return Err(RepositoryError::conflict("theory with this slug already exists"));
        }

        let now = Utc::now();
        let created = Theory {
            id: Uuid::new_v4(),
            slug: theory.slug.clone(),
            title: theory.title.clone(),
            claim: theory.claim.clone(),
            tldr: theory.tldr.clone(),
            realm: theory.realm.clone(),
            topic: theory.topic.clone(),
            tags: theory.tags.clone(),
            status: theory.status,
            author_id: theory.author_id,
            created_at: now,
            updated_at: now,
        };
        state.theories.push(created.clone());
        Ok(created)
    }

    async fn get_theory(&self, id: TheoryId) -> Result<Option<Theory>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.theories.iter().find(|t| t.id == id).cloned())
    }

    async fn get_theory_by_slug(&self, slug: &str) -> Result<Option<Theory>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.theories.iter().find(|t| t.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.theories.iter().any(|t| t.slug == slug))
    }

    async fn list_theories(&self, filter: &TheoryFilter) -> Result<Page<Theory>, RepositoryError> {
        let state = self.state.read().await;
        let matching: Vec<&Theory> = state
            .theories
            .iter()
            .rev()
            .filter(|t| matches_filter(t, filter))
            .collect();

        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        let limit = filter.limit as usize;
        let items: Vec<Theory> = matching
            .iter()
            .skip(offset)
            .take(limit)
            .map(|t| (*t).clone())
            .collect();
        let has_more = matching.len() > offset.saturating_add(limit);

        Ok(Page {
            items,
            total_count: matching.len() as u64,
            has_more,
        })
    }

    async fn update_theory(
        &self,
        id: TheoryId,
        update: &TheoryUpdate,
    ) -> Result<Option<Theory>, RepositoryError> {
        let mut state = self.state.write().await;
        let Some(theory) = state.theories.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        *theory = update.apply_to(theory);
        theory.updated_at = Utc::now();
        Ok(Some(theory.clone()))
    }

    async fn set_theory_status(
        &self,
        id: TheoryId,
        status: TheoryStatus,
    ) -> Result<Option<Theory>, RepositoryError> {
        let mut state = self.state.write().await;
        let Some(theory) = state.theories.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        theory.status = status;
        theory.updated_at = Utc::now();
        Ok(Some(theory.clone()))
    }
}

#[async_trait]
impl EvidenceRepository for MemoryStore {
    async fn create_card(&self, card: &NewEvidenceCard) -> Result<EvidenceCard, RepositoryError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let created = EvidenceCard {
            id: Uuid::new_v4(),
            theory_id: card.theory_id,
            author_id: card.author_id,
            content: card.content.clone(),
            source: card.source.clone(),
            source_title: card.source_title.clone(),
            context: card.context.clone(),
            stance: card.stance,
            status: CardStatus::Active,
            created_at: now,
            updated_at: now,
        };
        state.cards.push(created.clone());
        Ok(created)
    }

    async fn get_card(&self, id: CardId) -> Result<Option<EvidenceCard>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.cards.iter().find(|c| c.id == id).cloned())
    }

    async fn list_cards(
        &self,
        theory_ids: &[TheoryId],
        status: Option<CardStatus>,
    ) -> Result<Vec<EvidenceCard>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .cards
            .iter()
            .rev()
            .filter(|c| theory_ids.contains(&c.theory_id))
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect())
    }

    async fn update_card(
        &self,
        id: CardId,
        update: &EvidenceCardUpdate,
    ) -> Result<Option<EvidenceCard>, RepositoryError> {
        let mut state = self.state.write().await;
        let Some(card) = state.cards.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(content) = &update.content {
            card.content = content.clone();
        }
        if let Some(source) = &update.source {
            card.source = Some(source.clone());
        }
        if let Some(source_title) = &update.source_title {
            card.source_title = Some(source_title.clone());
        }
        if let Some(context) = &update.context {
            card.context = Some(context.clone());
        }
        card.updated_at = Utc::now();
        Ok(Some(card.clone()))
    }

    async fn set_card_status(
        &self,
        id: CardId,
        status: CardStatus,
    ) -> Result<Option<EvidenceCard>, RepositoryError> {
        let mut state = self.state.write().await;
        let Some(card) = state.cards.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        card.status = status;
        card.updated_at = Utc::now();
        Ok(Some(card.clone()))
    }
}

#[async_trait]
impl VoteRepository for MemoryStore {
    async fn upsert_vote(
        &self,
        card_id: CardId,
        user_id: UserId,
        strength: VoteStrength,
    ) -> Result<Vote, RepositoryError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let vote = state
            .votes
            .entry((user_id, card_id))
            .and_modify(|v| {
                v.strength = strength;
                v.updated_at = now;
            })
            .or_insert_with(|| Vote {
                id: Uuid::new_v4(),
                card_id,
                user_id,
                strength,
                created_at: now,
                updated_at: now,
            });
        Ok(vote.clone())
    }

    async fn delete_vote(&self, card_id: CardId, user_id: UserId) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.votes.remove(&(user_id, card_id)).is_some())
    }

    async fn votes_for_cards(&self, card_ids: &[CardId]) -> Result<Vec<Vote>, RepositoryError> {
        let state = self.state.read().await;
        let mut votes: Vec<Vote> = state
            .votes
            .values()
            .filter(|v| card_ids.contains(&v.card_id))
            .cloned()
            .collect();
        votes.sort_by_key(|v| v.created_at);
        Ok(votes)
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn create_report(&self, report: &NewReport) -> Result<Report, RepositoryError> {
        let mut state = self.state.write().await;
        let created = Report {
            id: Uuid::new_v4(),
            reporter_id: report.reporter_id,
            reason: report.reason,
            details: report.details.clone(),
            theory_id: report.theory_id,
            card_id: report.card_id,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        };
        state.reports.push(created.clone());
        Ok(created)
    }

    async fn get_report(&self, id: ReportId) -> Result<Option<Report>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.reports.iter().find(|r| r.id == id).cloned())
    }

    async fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .reports
            .iter()
            .rev()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    async fn update_report_status(
        &self,
        id: ReportId,
        status: ReportStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Report>, RepositoryError> {
        let mut state = self.state.write().await;
        let Some(report) = state.reports.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        report.status = status;
        if resolved_at.is_some() {
            report.resolved_at = resolved_at;
        }
        Ok(Some(report.clone()))
    }
}
