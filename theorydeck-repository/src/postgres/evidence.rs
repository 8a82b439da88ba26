use async_trait::async_trait;
use theorydeck_shared::types::{
    CardId, CardStatus, EvidenceCard, EvidenceCardUpdate, NewEvidenceCard, TheoryId,
};
use uuid::Uuid;

use super::rows::{CardRow, CARD_COLUMNS};
use super::{rows, PostgresStore};
use crate::{EvidenceRepository, RepositoryError};

#[async_trait]
impl EvidenceRepository for PostgresStore {
    async fn create_card(&self, card: &NewEvidenceCard) -> Result<EvidenceCard, RepositoryError> {
        let row: CardRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO evidence_cards
                (id, theory_id, author_id, content, source, source_title, context, stance, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(card.theory_id)
        .bind(card.author_id)
        .bind(&card.content)
        .bind(&card.source)
        .bind(&card.source_title)
        .bind(&card.context)
        .bind(card.stance.as_str())
        .bind(CardStatus::Active.as_str())
        .fetch_one(&self.pool)
        .await?;

        EvidenceCard::try_from(row)
    }

    async fn get_card(&self, id: CardId) -> Result<Option<EvidenceCard>, RepositoryError> {
        let row: Option<CardRow> =
            sqlx::query_as(&format!("SELECT {CARD_COLUMNS} FROM evidence_cards WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(EvidenceCard::try_from).transpose()
    }

    async fn list_cards(
        &self,
        theory_ids: &[TheoryId],
        status: Option<CardStatus>,
    ) -> Result<Vec<EvidenceCard>, RepositoryError> {
        if theory_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<CardRow> = sqlx::query_as(&format!(
            r#"
            SELECT {CARD_COLUMNS} FROM evidence_cards
            WHERE theory_id = ANY($1) AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(theory_ids)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows::convert_all(rows)
    }

    async fn update_card(
        &self,
        id: CardId,
        update: &EvidenceCardUpdate,
    ) -> Result<Option<EvidenceCard>, RepositoryError> {
        let row: Option<CardRow> = sqlx::query_as(&format!(
            r#"
            UPDATE evidence_cards SET
                content = COALESCE($2, content),
                source = COALESCE($3, source),
                source_title = COALESCE($4, source_title),
                context = COALESCE($5, context),
                updated_at = now()
            WHERE id = $1
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.content)
        .bind(&update.source)
        .bind(&update.source_title)
        .bind(&update.context)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EvidenceCard::try_from).transpose()
    }

    async fn set_card_status(
        &self,
        id: CardId,
        status: CardStatus,
    ) -> Result<Option<EvidenceCard>, RepositoryError> {
        let row: Option<CardRow> = sqlx::query_as(&format!(
            "UPDATE evidence_cards SET status = $2, updated_at = now() WHERE id = $1 RETURNING {CARD_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EvidenceCard::try_from).transpose()
    }
}
