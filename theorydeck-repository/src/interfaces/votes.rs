//! This module defines the `VoteRepository` trait, the vote store behind
//! evidence scoring.
use theorydeck_shared::types::{CardId, UserId, Vote, VoteStrength};

use crate::errors::RepositoryError;

/// A trait that defines the interface for persisting evidence votes.
///
/// Implementors must keep at most one vote per `(user_id, card_id)` pair;
/// writing a second vote for the same pair replaces the first.
#[async_trait::async_trait]
pub trait VoteRepository: Send + Sync {
    /// Inserts the caller's vote on a card, or updates its strength in place.
    ///
    /// # Arguments
    ///
    /// * `card_id` - The card being voted on
    /// * `user_id` - The voter
    /// * `strength` - The new strength
    ///
    /// # Returns
    ///
    /// The stored `Vote` after the write.
    async fn upsert_vote(
        &self,
        card_id: CardId,
        user_id: UserId,
        strength: VoteStrength,
    ) -> Result<Vote, RepositoryError>;

    /// Deletes the vote for the pair.
    ///
    /// # Returns
    ///
    /// `true` if a vote existed and was removed, `false` if there was none.
    async fn delete_vote(&self, card_id: CardId, user_id: UserId) -> Result<bool, RepositoryError>;

    /// Returns every vote currently attached to any of the given cards.
    async fn votes_for_cards(&self, card_ids: &[CardId]) -> Result<Vec<Vote>, RepositoryError>;
}
