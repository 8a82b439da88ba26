//! Vote submission and removal.
//!
//! Votes are plain upserts keyed by `(user, card)`. Nothing is aggregated at
//! write time; theory and card scores are recomputed on every read.
use std::sync::Arc;

use theorydeck_repository::{EvidenceRepository, Store, VoteRepository};
use theorydeck_shared::types::{CardId, EvidenceCard, User, Vote, VoteStrength};
use theorydeck_shared::ValidationErrors;
use tracing::{debug, info};

use crate::errors::ServiceError;

pub struct VoteService {
    store: Arc<dyn Store>,
    allow_self_vote: bool,
}

impl VoteService {
    /// Creates a new `VoteService`.
    ///
    /// # Arguments
    ///
    /// * `store` - Persistence backend
    /// * `allow_self_vote` - Whether authors may vote on their own cards
    pub fn new(store: Arc<dyn Store>, allow_self_vote: bool) -> Self {
        Self {
            store,
            allow_self_vote,
        }
    }

    async fn active_card(&self, card_id: CardId) -> Result<EvidenceCard, ServiceError> {
        match self.store.get_card(card_id).await? {
            Some(card) if card.is_active() => Ok(card),
            _ => Err(ServiceError::NotFound("Evidence card")),
        }
    }

    /// Records the caller's vote on a card, replacing any earlier vote.
    ///
    /// `strength` arrives as the raw integer from the request; anything
    /// outside {0, 2, 5, 8, 10} is rejected before the store is touched.
    ///
    /// # Errors
    ///
    /// * `Validation` - strength outside the scale
    /// * `NotFound` - the card does not exist or is not `ACTIVE`
    /// * `Forbidden` - the caller wrote the card and self-voting is disabled
    pub async fn submit_vote(
        &self,
        card_id: CardId,
        caller: &User,
        strength: i64,
    ) -> Result<Vote, ServiceError> {
        let strength = VoteStrength::try_from(strength).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("strength", e.to_string());
            ServiceError::Validation(errors)
        })?;

        let card = self.active_card(card_id).await?;
        if card.author_id == caller.id && !self.allow_self_vote {
            return Err(ServiceError::forbidden("You cannot vote on your own evidence"));
        }

        let vote = self.store.upsert_vote(card_id, caller.id, strength).await?;
        info!(card_id = %card_id, user_id = %caller.id, strength = %strength, "Vote recorded");
        Ok(vote)
    }

    /// Removes the caller's vote on a card.
    ///
    /// Returns whether a vote was actually removed. A missing vote is not an
    /// error, but the card itself must exist.
    pub async fn remove_vote(&self, card_id: CardId, caller: &User) -> Result<bool, ServiceError> {
        if self.store.get_card(card_id).await?.is_none() {
            return Err(ServiceError::NotFound("Evidence card"));
        }

        let removed = self.store.delete_vote(card_id, caller.id).await?;
        debug!(card_id = %card_id, user_id = %caller.id, removed, "Vote removal");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_card, seed_theory, seed_user};
    use theorydeck_repository::MemoryStore;
    use theorydeck_shared::types::{CardStatus, Stance, UserRole};

    async fn setup(allow_self_vote: bool) -> (Arc<MemoryStore>, VoteService, User, EvidenceCard) {
        let store = Arc::new(MemoryStore::new());
        let author = seed_user(&store, "author@example.com", UserRole::User).await;
        let theory = seed_theory(&store, &author, "Dolphins run the ocean").await;
        let card = seed_card(&store, &theory, &author, Stance::For).await;
        let service = VoteService::new(store.clone(), allow_self_vote);
        (store, service, author, card)
    }

    #[tokio::test]
    async fn test_invalid_strength_is_rejected_without_writing() {
        let (store, service, _author, card) = setup(false).await;
        let voter = seed_user(&store, "voter@example.com", UserRole::User).await;

        for strength in [1, 7, -5, 11] {
            let result = service.submit_vote(card.id, &voter, strength).await;
            match result {
                Err(ServiceError::Validation(errors)) => assert!(errors.get("strength").is_some()),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
        assert!(store.votes_for_cards(&[card.id]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_revote_replaces_previous_strength() {
        let (store, service, _author, card) = setup(false).await;
        let voter = seed_user(&store, "voter@example.com", UserRole::User).await;

        service.submit_vote(card.id, &voter, 2).await.unwrap();
        service.submit_vote(card.id, &voter, 8).await.unwrap();

        let votes = store.votes_for_cards(&[card.id]).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].strength, VoteStrength::STRONG);
    }

    #[tokio::test]
    async fn test_same_vote_twice_leaves_one_row() {
        let (store, service, _author, card) = setup(false).await;
        let voter = seed_user(&store, "voter@example.com", UserRole::User).await;

        service.submit_vote(card.id, &voter, 5).await.unwrap();
        service.submit_vote(card.id, &voter, 5).await.unwrap();

        let votes = store.votes_for_cards(&[card.id]).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].strength.value(), 5);
    }

    #[tokio::test]
    async fn test_self_vote_is_forbidden_by_default() {
        let (_store, service, author, card) = setup(false).await;
        let result = service.submit_vote(card.id, &author, 10).await;
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_self_vote_allowed_when_configured() {
        let (_store, service, author, card) = setup(true).await;
        let vote = service.submit_vote(card.id, &author, 10).await.unwrap();
        assert_eq!(vote.strength, VoteStrength::VERY_STRONG);
    }

    #[tokio::test]
    async fn test_vote_on_hidden_or_missing_card_is_not_found() {
        let (store, service, _author, card) = setup(false).await;
        let voter = seed_user(&store, "voter@example.com", UserRole::User).await;
        store.set_card_status(card.id, CardStatus::Hidden).await.unwrap();

        let hidden = service.submit_vote(card.id, &voter, 5).await;
        assert!(matches!(hidden, Err(ServiceError::NotFound(_))));

        let missing = service.submit_vote(uuid::Uuid::new_v4(), &voter, 5).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_vote_is_idempotent() {
        let (store, service, _author, card) = setup(false).await;
        let voter = seed_user(&store, "voter@example.com", UserRole::User).await;
        service.submit_vote(card.id, &voter, 5).await.unwrap();

        assert!(service.remove_vote(card.id, &voter).await.unwrap());
        assert!(!service.remove_vote(card.id, &voter).await.unwrap());

        let missing = service.remove_vote(uuid::Uuid::new_v4(), &voter).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }
}
