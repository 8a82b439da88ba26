use theorydeck_shared::types::{CardId, CardStatus, EvidenceCard, EvidenceCardUpdate, NewEvidenceCard, TheoryId};

use crate::errors::RepositoryError;

/// A trait that defines the interface for persisting evidence cards.
///
/// Cards are never physically removed; deletion and moderation are status
/// transitions so their votes stay addressable.
#[async_trait::async_trait]
pub trait EvidenceRepository: Send + Sync {
    /// Inserts a card with status `ACTIVE`.
    async fn create_card(&self, card: &NewEvidenceCard) -> Result<EvidenceCard, RepositoryError>;

    async fn get_card(&self, id: CardId) -> Result<Option<EvidenceCard>, RepositoryError>;

    /// Lists the cards of the given theories, newest first.
    ///
    /// # Arguments
    ///
    /// * `theory_ids` - Theories whose cards are wanted (empty slices return nothing)
    /// * `status` - Restrict to cards in this status, or `None` for all
    async fn list_cards(
        &self,
        theory_ids: &[TheoryId],
        status: Option<CardStatus>,
    ) -> Result<Vec<EvidenceCard>, RepositoryError>;

    async fn update_card(
        &self,
        id: CardId,
        update: &EvidenceCardUpdate,
    ) -> Result<Option<EvidenceCard>, RepositoryError>;

    async fn set_card_status(
        &self,
        id: CardId,
        status: CardStatus,
    ) -> Result<Option<EvidenceCard>, RepositoryError>;
}
