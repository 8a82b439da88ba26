use async_trait::async_trait;
use theorydeck_shared::types::{CardId, UserId, Vote, VoteStrength};
use uuid::Uuid;

use super::rows::{VoteRow, VOTE_COLUMNS};
use super::{rows, PostgresStore};
use crate::{RepositoryError, VoteRepository};

#[async_trait]
impl VoteRepository for PostgresStore {
    /// Writes the vote with a single `INSERT ... ON CONFLICT DO UPDATE`.
    ///
    /// Concurrent re-votes by the same user serialize on the
    /// `votes_user_card_key` constraint; the last write wins.
    async fn upsert_vote(
        &self,
        card_id: CardId,
        user_id: UserId,
        strength: VoteStrength,
    ) -> Result<Vote, RepositoryError> {
        let row: VoteRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO votes (id, card_id, user_id, strength)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, card_id)
            DO UPDATE SET
                strength = EXCLUDED.strength,
                updated_at = now()
            RETURNING {VOTE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(card_id)
        .bind(user_id)
        .bind(i16::from(strength))
        .fetch_one(&self.pool)
        .await?;

        Vote::try_from(row)
    }

    async fn delete_vote(&self, card_id: CardId, user_id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM votes WHERE card_id = $1 AND user_id = $2")
            .bind(card_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn votes_for_cards(&self, card_ids: &[CardId]) -> Result<Vec<Vote>, RepositoryError> {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<VoteRow> = sqlx::query_as(&format!(
            "SELECT {VOTE_COLUMNS} FROM votes WHERE card_id = ANY($1) ORDER BY created_at"
        ))
        .bind(card_ids)
        .fetch_all(&self.pool)
        .await?;

        rows::convert_all(rows)
    }
}
