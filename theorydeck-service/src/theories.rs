//! Theory workflows and the read paths that attach live scores.
use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use theorydeck_repository::{
    EvidenceRepository, RepositoryError, Store, TheoryRepository, UserRepository, VoteRepository,
};
use theorydeck_scoring::{card_vote_stats, theory_vote_stats, ConfidenceLevel, ScoredCard};
use theorydeck_shared::permissions::{can_delete_theory, can_edit_theory};
use theorydeck_shared::slug::{generate_slug, slug_candidate};
use theorydeck_shared::types::{
    CardId, CardStatus, CardVoteStats, EvidenceCard, NewTheory, Theory, TheoryFilter, TheoryId,
    TheoryStatus, TheoryUpdate, TheoryVoteStats, User, UserId, Vote, VoteStrength,
};
use theorydeck_shared::validation::validate_theory;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::views::{AuthorView, CardView, TheoryDetail, TheoryPage, TheorySummary};

/// Collision suffixes tried before giving up on a title.
const MAX_SLUG_ATTEMPTS: u32 = 100;

/// Body of a theory creation request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoryInput {
    pub title: Option<String>,
    pub claim: Option<String>,
    pub tldr: Option<String>,
    pub realm: Option<String>,
    pub topic: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<TheoryStatus>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_tags(tags: Option<Vec<String>>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for tag in tags.unwrap_or_default() {
        let tag = tag.trim();
        if !tag.is_empty() && !cleaned.iter().any(|t| t == tag) {
            cleaned.push(tag.to_string());
        }
    }
    cleaned
}

/// Authors of everything on a page, keyed by id.
struct Authors(HashMap<UserId, AuthorView>);

impl Authors {
    fn get(&self, id: UserId) -> AuthorView {
        self.0.get(&id).cloned().unwrap_or_else(|| AuthorView::unknown(id))
    }
}

/// Cards of one or more theories together with their vote sets.
struct ScoredCards {
    cards: Vec<EvidenceCard>,
    votes: HashMap<CardId, Vec<Vote>>,
}

impl ScoredCards {
    fn card_stats(&self, card_id: CardId) -> CardVoteStats {
        let votes = self.votes.get(&card_id).map(Vec::as_slice).unwrap_or_default();
        card_vote_stats(votes.iter().map(|v| v.strength))
    }

    fn user_vote(&self, card_id: CardId, user: Option<&User>) -> Option<VoteStrength> {
        let user = user?;
        self.votes
            .get(&card_id)?
            .iter()
            .find(|v| v.user_id == user.id)
            .map(|v| v.strength)
    }

    fn theory_cards(&self, theory_id: TheoryId) -> impl Iterator<Item = &EvidenceCard> {
        self.cards.iter().filter(move |c| c.theory_id == theory_id)
    }

    fn theory_stats(&self, theory_id: TheoryId) -> TheoryVoteStats {
        let scored: Vec<ScoredCard> = self
            .theory_cards(theory_id)
            .map(|card| ScoredCard {
                stance: card.stance,
                status: card.status,
                stats: self.card_stats(card.id),
            })
            .collect();
        theory_vote_stats(&scored)
    }
}

pub struct TheoryService {
    store: Arc<dyn Store>,
}

impl TheoryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Loads the active cards of the given theories and every vote on them.
    async fn load_scored_cards(&self, theory_ids: &[TheoryId]) -> Result<ScoredCards, ServiceError> {
        let cards = self
            .store
            .list_cards(theory_ids, Some(CardStatus::Active))
            .await?;
        let card_ids: Vec<CardId> = cards.iter().map(|c| c.id).collect();

        let mut votes: HashMap<CardId, Vec<Vote>> = HashMap::new();
        for vote in self.store.votes_for_cards(&card_ids).await? {
            votes.entry(vote.card_id).or_default().push(vote);
        }

        Ok(ScoredCards { cards, votes })
    }

    /// Resolves the authors of the given theories and cards in one lookup.
    async fn load_authors<I>(&self, author_ids: I) -> Result<Authors, ServiceError>
    where
        I: IntoIterator<Item = UserId>,
    {
        let mut ids: Vec<UserId> = author_ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let users = self.store.users_by_ids(&ids).await?;
        Ok(Authors(
            users.iter().map(|u| (u.id, AuthorView::from(u))).collect(),
        ))
    }

    async fn existing(&self, id: TheoryId) -> Result<Theory, ServiceError> {
        self.store
            .get_theory(id)
            .await?
            .ok_or(ServiceError::NotFound("Theory"))
    }

    /// Creates a theory authored by the caller.
    ///
    /// The slug is derived from the title and suffixed with `-1`, `-2`, ...
    /// until it is free. New theories are `ACTIVE` unless `DRAFT` was asked for.
    pub async fn create(&self, caller: &User, input: TheoryInput) -> Result<Theory, ServiceError> {
        validate_theory(
            input.title.as_deref(),
            input.claim.as_deref(),
            input.tldr.as_deref(),
        )?;

        let title = input.title.unwrap_or_default().trim().to_string();
        let status = match input.status {
            Some(TheoryStatus::Draft) => TheoryStatus::Draft,
            _ => TheoryStatus::Active,
        };
        let base = generate_slug(&title);
        let mut new_theory = NewTheory {
            slug: base.clone(),
            title,
            claim: input.claim.unwrap_or_default().trim().to_string(),
            tldr: input.tldr.unwrap_or_default().trim().to_string(),
            realm: non_empty(input.realm),
            topic: non_empty(input.topic),
            tags: clean_tags(input.tags),
            status,
            author_id: caller.id,
        };

        for attempt in 0..MAX_SLUG_ATTEMPTS {
            new_theory.slug = slug_candidate(&base, attempt);
            if self.store.slug_exists(&new_theory.slug).await? {
                continue;
            }
            match self.store.create_theory(&new_theory).await {
                Ok(theory) => {
                    info!(theory_id = %theory.id, slug = %theory.slug, author_id = %caller.id, "Theory created");
                    return Ok(theory);
                }
                // Lost a race for this slug; try the next suffix.
                Err(RepositoryError::Conflict(_)) => {
                    debug!(slug = %new_theory.slug, "Slug taken concurrently");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(base = %base, "No free slug left for title");
        Err(ServiceError::Conflict(format!("No free slug for '{base}'")))
    }

    /// Returns a theory with its active cards, each card's vote statistics,
    /// the caller's own votes and the theory-level balance.
    pub async fn get_by_slug(&self, slug: &str, caller: Option<&User>) -> Result<TheoryDetail, ServiceError> {
        let theory = self
            .store
            .get_theory_by_slug(slug)
            .await?
            .ok_or(ServiceError::NotFound("Theory"))?;

        let scored = self.load_scored_cards(&[theory.id]).await?;
        let author_ids = std::iter::once(theory.author_id).chain(scored.cards.iter().map(|c| c.author_id));
        let authors = self.load_authors(author_ids).await?;
        let vote_stats = scored.theory_stats(theory.id);
        let evidence_cards = scored
            .theory_cards(theory.id)
            .map(|card| CardView {
                card: card.clone(),
                author: authors.get(card.author_id),
                vote_stats: scored.card_stats(card.id),
                user_vote: scored.user_vote(card.id, caller),
            })
            .collect();

        Ok(TheoryDetail {
            author: authors.get(theory.author_id),
            theory,
            evidence_cards,
            vote_stats,
            confidence: ConfidenceLevel::from_percent(vote_stats.for_percent),
        })
    }

    /// Lists one page of theories, newest first, each with its balance.
    pub async fn list(&self, filter: &TheoryFilter) -> Result<TheoryPage, ServiceError> {
        let page = self.store.list_theories(filter).await?;
        let theory_ids: Vec<TheoryId> = page.items.iter().map(|t| t.id).collect();
        let scored = self.load_scored_cards(&theory_ids).await?;
        let authors = self.load_authors(page.items.iter().map(|t| t.author_id)).await?;

        let theories = page
            .items
            .into_iter()
            .map(|theory| {
                let vote_stats = scored.theory_stats(theory.id);
                let evidence_count = scored.theory_cards(theory.id).count() as u32;
                TheorySummary {
                    author: authors.get(theory.author_id),
                    theory,
                    evidence_count,
                    vote_stats,
                    confidence: ConfidenceLevel::from_percent(vote_stats.for_percent),
                }
            })
            .collect();

        Ok(TheoryPage {
            theories,
            has_more: page.has_more,
            total_count: page.total_count,
            page: filter.page,
        })
    }

    /// Edits a theory. The merged result must still pass validation.
    pub async fn update(&self, caller: &User, id: TheoryId, update: TheoryUpdate) -> Result<Theory, ServiceError> {
        let theory = self.existing(id).await?;
        if !can_edit_theory(caller.id, theory.author_id, caller.role) {
            return Err(ServiceError::forbidden("You cannot edit this theory"));
        }

        let merged = update.apply_to(&theory);
        validate_theory(Some(&merged.title), Some(&merged.claim), Some(&merged.tldr))?;

        let updated = self
            .store
            .update_theory(id, &update)
            .await?
            .ok_or(ServiceError::NotFound("Theory"))?;
        info!(theory_id = %id, user_id = %caller.id, "Theory updated");
        Ok(updated)
    }

    /// Soft-deletes a theory by archiving it.
    pub async fn delete(&self, caller: &User, id: TheoryId) -> Result<Theory, ServiceError> {
        let theory = self.existing(id).await?;
        if !can_delete_theory(caller.id, theory.author_id, caller.role) {
            return Err(ServiceError::forbidden("You cannot delete this theory"));
        }

        let archived = self
            .store
            .set_theory_status(id, TheoryStatus::Archived)
            .await?
            .ok_or(ServiceError::NotFound("Theory"))?;
        info!(theory_id = %id, user_id = %caller.id, "Theory archived");
        Ok(archived)
    }

    /// Moves a theory to any lifecycle status. Moderators only.
    pub async fn set_status(&self, caller: &User, id: TheoryId, status: TheoryStatus) -> Result<Theory, ServiceError> {
        if !caller.role.can_moderate() {
            return Err(ServiceError::forbidden("Moderator rights required"));
        }

        let theory = self
            .store
            .set_theory_status(id, status)
            .await?
            .ok_or(ServiceError::NotFound("Theory"))?;
        info!(theory_id = %id, status = %status, moderator_id = %caller.id, "Theory status changed");
        Ok(theory)
    }
}
