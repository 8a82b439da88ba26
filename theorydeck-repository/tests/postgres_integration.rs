//! Integration tests for the PostgreSQL store.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `DATABASE_URL=postgres://... cargo test --test postgres_integration`

use sqlx::Row;
use theorydeck_repository::{
    EvidenceRepository, PostgresStore, ReportRepository, RepositoryError, TheoryRepository,
    UserRepository, VoteRepository,
};
use theorydeck_shared::types::{
    CardStatus, EvidenceCard, NewEvidenceCard, NewReport, NewTheory, NewUser, ReportReason,
    ReportStatus, Stance, Theory, TheoryFilter, TheoryStatus, TheoryUpdate, User, UserRole,
    VoteStrength,
};

async fn make_user(store: &PostgresStore, email: &str) -> User {
    store
        .create_user(&NewUser {
            email: email.to_string(),
            name: Some("Tester".to_string()),
            role: UserRole::User,
        })
        .await
        .unwrap()
}

async fn make_theory(store: &PostgresStore, author: &User, slug: &str) -> Theory {
    store
        .create_theory(&NewTheory {
            slug: slug.to_string(),
            title: format!("Theory {slug}"),
            claim: "The lighthouse keeper never left the island.".to_string(),
            tldr: "Logbooks stop mid-sentence.".to_string(),
            realm: Some("History".to_string()),
            topic: Some("Mysteries".to_string()),
            tags: vec!["island".to_string(), "logbook".to_string()],
            status: TheoryStatus::Active,
            author_id: author.id,
        })
        .await
        .unwrap()
}

async fn make_card(store: &PostgresStore, theory: &Theory, author: &User, stance: Stance) -> EvidenceCard {
    store
        .create_card(&NewEvidenceCard {
            theory_id: theory.id,
            author_id: author.id,
            content: "The final logbook entry ends without punctuation.".to_string(),
            source: Some("https://archive.example.org/log".to_string()),
            source_title: None,
            context: None,
            stance,
        })
        .await
        .unwrap()
}

// ============================================================================
// Users
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_duplicate_email_is_conflict(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    make_user(&store, "dup@example.com").await;

    let result = store
        .create_user(&NewUser {
            email: "dup@example.com".to_string(),
            name: None,
            role: UserRole::User,
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_update_user_role(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    let user = make_user(&store, "mod@example.com").await;

    let updated = store
        .update_user(
            user.id,
            &theorydeck_shared::types::UserUpdate {
                role: Some(UserRole::Moderator),
                name: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.role, UserRole::Moderator);
    assert_eq!(updated.name.as_deref(), Some("Tester"));
    assert_eq!(store.list_users(Some(UserRole::Moderator)).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_users_by_ids_skips_unknown(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    let alice = make_user(&store, "alice@example.com").await;
    let bob = make_user(&store, "bob@example.com").await;

    let mut found = store
        .users_by_ids(&[alice.id, bob.id, uuid::Uuid::new_v4()])
        .await
        .unwrap();
    found.sort_by(|a, b| a.email.cmp(&b.email));

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].id, alice.id);
    assert_eq!(found[1].id, bob.id);
    assert!(store.users_by_ids(&[]).await.unwrap().is_empty());
}

// ============================================================================
// Theories
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_duplicate_slug_is_conflict(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    let author = make_user(&store, "author@example.com").await;
    make_theory(&store, &author, "keeper").await;

    assert!(store.slug_exists("keeper").await.unwrap());
    let result = store
        .create_theory(&NewTheory {
            slug: "keeper".to_string(),
            title: "Another".to_string(),
            claim: "Another claim entirely.".to_string(),
            tldr: "Another summary.".to_string(),
            realm: None,
            topic: None,
            tags: Vec::new(),
            status: TheoryStatus::Active,
            author_id: author.id,
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_list_theories_pages_and_searches(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    let author = make_user(&store, "author@example.com").await;
    for i in 0..3 {
        make_theory(&store, &author, &format!("keeper-{i}")).await;
    }
    let draft = make_theory(&store, &author, "draft").await;
    store.set_theory_status(draft.id, TheoryStatus::Draft).await.unwrap();

    let page = store
        .list_theories(&TheoryFilter { limit: 2, ..Default::default() })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 3);
    assert!(page.has_more);

    let by_tag = store
        .list_theories(&TheoryFilter {
            search: Some("logbook".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_tag.total_count, 3);

    let by_title = store
        .list_theories(&TheoryFilter {
            search: Some("KEEPER-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_title.items.len(), 1);

    let wildcard = store
        .list_theories(&TheoryFilter {
            search: Some("%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(wildcard.total_count, 0);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_update_theory_keeps_unset_fields(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    let author = make_user(&store, "author@example.com").await;
    let theory = make_theory(&store, &author, "keeper").await;

    let updated = store
        .update_theory(
            theory.id,
            &TheoryUpdate {
                title: Some("The keeper stayed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "The keeper stayed");
    assert_eq!(updated.claim, theory.claim);
    assert_eq!(updated.tags, theory.tags);
}

// ============================================================================
// Evidence and votes
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_upsert_vote_replaces_strength(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool.clone()).await.unwrap();
    let author = make_user(&store, "author@example.com").await;
    let voter = make_user(&store, "voter@example.com").await;
    let theory = make_theory(&store, &author, "keeper").await;
    let card = make_card(&store, &theory, &author, Stance::For).await;

    store.upsert_vote(card.id, voter.id, VoteStrength::WEAK).await.unwrap();
    let vote = store
        .upsert_vote(card.id, voter.id, VoteStrength::STRONG)
        .await
        .unwrap();
    assert_eq!(vote.strength, VoteStrength::STRONG);

    let rows = sqlx::query("SELECT strength FROM votes").fetch_all(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<i16, _>("strength"), 8);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_delete_vote_is_idempotent(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    let author = make_user(&store, "author@example.com").await;
    let theory = make_theory(&store, &author, "keeper").await;
    let card = make_card(&store, &theory, &author, Stance::Against).await;

    store.upsert_vote(card.id, author.id, VoteStrength::MODERATE).await.unwrap();
    assert!(store.delete_vote(card.id, author.id).await.unwrap());
    assert!(!store.delete_vote(card.id, author.id).await.unwrap());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_strength_outside_scale_is_rejected_by_schema(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool.clone()).await.unwrap();
    let author = make_user(&store, "author@example.com").await;
    let theory = make_theory(&store, &author, "keeper").await;
    let card = make_card(&store, &theory, &author, Stance::For).await;

    let result = sqlx::query(
        "INSERT INTO votes (id, card_id, user_id, strength) VALUES ($1, $2, $3, 7)",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(card.id)
    .bind(author.id)
    .execute(&pool)
    .await;

    assert!(result.is_err());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_list_cards_by_status(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    let author = make_user(&store, "author@example.com").await;
    let theory = make_theory(&store, &author, "keeper").await;
    let kept = make_card(&store, &theory, &author, Stance::For).await;
    let hidden = make_card(&store, &theory, &author, Stance::Against).await;
    store.set_card_status(hidden.id, CardStatus::Hidden).await.unwrap();

    let active = store
        .list_cards(&[theory.id], Some(CardStatus::Active))
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, kept.id);
    assert_eq!(store.list_cards(&[theory.id], None).await.unwrap().len(), 2);
}

// ============================================================================
// Reports
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_report_lifecycle(pool: sqlx::PgPool) {
    let store = PostgresStore::new(pool).await.unwrap();
    let author = make_user(&store, "author@example.com").await;
    let theory = make_theory(&store, &author, "keeper").await;

    let report = store
        .create_report(&NewReport {
            reporter_id: author.id,
            reason: ReportReason::Duplicate,
            details: Some("Same as another theory".to_string()),
            theory_id: Some(theory.id),
            card_id: None,
        })
        .await
        .unwrap();
    assert_eq!(report.status, ReportStatus::Pending);

    let resolved = store
        .update_report_status(report.id, ReportStatus::Dismissed, Some(chrono::Utc::now()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.status, ReportStatus::Dismissed);
    assert!(resolved.resolved_at.is_some());
    assert!(store.list_reports(Some(ReportStatus::Pending)).await.unwrap().is_empty());
}
