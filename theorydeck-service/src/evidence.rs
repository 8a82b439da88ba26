//! Evidence card workflows.
use std::sync::Arc;

use serde::Deserialize;
use theorydeck_repository::{EvidenceRepository, Store, TheoryRepository};
use theorydeck_shared::permissions::{can_delete_evidence, can_edit_evidence};
use theorydeck_shared::types::{
    CardId, CardStatus, EvidenceCard, EvidenceCardUpdate, NewEvidenceCard, Stance, TheoryId, User,
};
use theorydeck_shared::validation::validate_evidence;
use theorydeck_shared::ValidationErrors;
use tracing::info;

use crate::errors::ServiceError;

/// Body of an evidence creation request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceInput {
    pub theory_id: Option<TheoryId>,
    pub content: Option<String>,
    pub stance: Option<Stance>,
    pub source: Option<String>,
    pub source_title: Option<String>,
    pub context: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct EvidenceService {
    store: Arc<dyn Store>,
}

impl EvidenceService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn existing(&self, id: CardId) -> Result<EvidenceCard, ServiceError> {
        self.store
            .get_card(id)
            .await?
            .ok_or(ServiceError::NotFound("Evidence card"))
    }

    /// Posts a new card on a theory. Cards start out `ACTIVE`.
    pub async fn create(&self, caller: &User, input: EvidenceInput) -> Result<EvidenceCard, ServiceError> {
        let mut errors = match validate_evidence(
            input.content.as_deref(),
            input.stance,
            input.source.as_deref(),
        ) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if input.theory_id.is_none() {
            errors.add("theoryId", "Theory is required");
        }
        errors.into_result()?;

        let (Some(theory_id), Some(stance)) = (input.theory_id, input.stance) else {
            return Err(ServiceError::bad_request("Theory and stance are required"));
        };
        if self.store.get_theory(theory_id).await?.is_none() {
            return Err(ServiceError::NotFound("Theory"));
        }

        let card = self
            .store
            .create_card(&NewEvidenceCard {
                theory_id,
                author_id: caller.id,
                content: input.content.unwrap_or_default().trim().to_string(),
                source: non_empty(input.source),
                source_title: non_empty(input.source_title),
                context: non_empty(input.context),
                stance,
            })
            .await?;

        info!(card_id = %card.id, theory_id = %theory_id, stance = %stance, author_id = %caller.id, "Evidence card created");
        Ok(card)
    }

    /// Edits a card's text fields. Author or moderator.
    pub async fn update(
        &self,
        caller: &User,
        id: CardId,
        update: EvidenceCardUpdate,
    ) -> Result<EvidenceCard, ServiceError> {
        let card = self.existing(id).await?;
        if !can_edit_evidence(caller.id, card.author_id, caller.role) {
            return Err(ServiceError::forbidden("You cannot edit this evidence"));
        }

        let content = update.content.as_deref().unwrap_or(&card.content);
        let source = update.source.as_deref().or(card.source.as_deref());
        validate_evidence(Some(content), Some(card.stance), source)?;

        let updated = self
            .store
            .update_card(id, &update)
            .await?
            .ok_or(ServiceError::NotFound("Evidence card"))?;
        info!(card_id = %id, user_id = %caller.id, "Evidence card updated");
        Ok(updated)
    }

    /// Soft-deletes a card. Its votes stay stored but stop counting.
    pub async fn delete(&self, caller: &User, id: CardId) -> Result<EvidenceCard, ServiceError> {
        let card = self.existing(id).await?;
        if !can_delete_evidence(caller.id, card.author_id, caller.role) {
            return Err(ServiceError::forbidden("You cannot delete this evidence"));
        }

        let deleted = self
            .store
            .set_card_status(id, CardStatus::Deleted)
            .await?
            .ok_or(ServiceError::NotFound("Evidence card"))?;
        info!(card_id = %id, user_id = %caller.id, "Evidence card deleted");
        Ok(deleted)
    }
}
