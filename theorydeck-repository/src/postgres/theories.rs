use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use theorydeck_shared::types::{
    NewTheory, Page, Theory, TheoryFilter, TheoryId, TheoryStatus, TheoryUpdate,
};
use uuid::Uuid;

use super::rows::{TheoryRow, THEORY_COLUMNS};
use super::{map_unique_violation, rows, PostgresStore};
use crate::{RepositoryError, TheoryRepository};

/// Escapes `LIKE` wildcards so user search text is matched literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends the `WHERE` clause shared by the page query and the count query.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &TheoryFilter) {
    builder
        .push(" WHERE status = ")
        .push_bind(filter.effective_status().as_str());

    if let Some(realm) = &filter.realm {
        builder.push(" AND realm = ").push_bind(realm.clone());
    }
    if let Some(topic) = &filter.topic {
        builder.push(" AND topic = ").push_bind(topic.clone());
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR claim ILIKE ")
            .push_bind(pattern)
            .push(" OR ")
            .push_bind(search.to_string())
            .push(" = ANY(tags))");
    }
}

#[async_trait]
impl TheoryRepository for PostgresStore {
    async fn create_theory(&self, theory: &NewTheory) -> Result<Theory, RepositoryError> {
        let row: TheoryRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO theories (id, slug, title, claim, tldr, realm, topic, tags, status, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {THEORY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&theory.slug)
        .bind(&theory.title)
        .bind(&theory.claim)
        .bind(&theory.tldr)
        .bind(&theory.realm)
        .bind(&theory.topic)
        .bind(&theory.tags)
        .bind(theory.status.as_str())
        .bind(theory.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "theory with this slug"))?;

        Theory::try_from(row)
    }

    async fn get_theory(&self, id: TheoryId) -> Result<Option<Theory>, RepositoryError> {
        let row: Option<TheoryRow> =
            sqlx::query_as(&format!("SELECT {THEORY_COLUMNS} FROM theories WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Theory::try_from).transpose()
    }

    async fn get_theory_by_slug(&self, slug: &str) -> Result<Option<Theory>, RepositoryError> {
        let row: Option<TheoryRow> =
            sqlx::query_as(&format!("SELECT {THEORY_COLUMNS} FROM theories WHERE slug = $1"))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Theory::try_from).transpose()
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM theories WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Fetches `limit + 1` rows to learn whether another page exists without
    /// a second round trip, then counts the full match set separately.
    async fn list_theories(&self, filter: &TheoryFilter) -> Result<Page<Theory>, RepositoryError> {
        let limit = i64::from(filter.limit);

        let mut page_query = QueryBuilder::new(format!("SELECT {THEORY_COLUMNS} FROM theories"));
        push_filters(&mut page_query, filter);
        page_query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit + 1)
            .push(" OFFSET ")
            .push_bind(filter.offset() as i64);

        let rows: Vec<TheoryRow> = page_query.build_query_as().fetch_all(&self.pool).await?;

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM theories");
        push_filters(&mut count_query, filter);
        let total_count: i64 = count_query.build_query_scalar().fetch_one(&self.pool).await?;

        let mut items: Vec<Theory> = rows::convert_all(rows)?;
        let has_more = items.len() as i64 > limit;
        items.truncate(filter.limit as usize);

        Ok(Page {
            items,
            total_count: total_count.max(0) as u64,
            has_more,
        })
    }

    async fn update_theory(
        &self,
        id: TheoryId,
        update: &TheoryUpdate,
    ) -> Result<Option<Theory>, RepositoryError> {
        let row: Option<TheoryRow> = sqlx::query_as(&format!(
            r#"
            UPDATE theories SET
                title = COALESCE($2, title),
                claim = COALESCE($3, claim),
                tldr = COALESCE($4, tldr),
                realm = COALESCE($5, realm),
                topic = COALESCE($6, topic),
                tags = COALESCE($7, tags),
                updated_at = now()
            WHERE id = $1
            RETURNING {THEORY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.title)
        .bind(&update.claim)
        .bind(&update.tldr)
        .bind(&update.realm)
        .bind(&update.topic)
        .bind(&update.tags)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Theory::try_from).transpose()
    }

    async fn set_theory_status(
        &self,
        id: TheoryId,
        status: TheoryStatus,
    ) -> Result<Option<Theory>, RepositoryError> {
        let row: Option<TheoryRow> = sqlx::query_as(&format!(
            "UPDATE theories SET status = $2, updated_at = now() WHERE id = $1 RETURNING {THEORY_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Theory::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain words"), "plain words");
    }
}
