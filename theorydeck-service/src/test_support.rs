//! Fixtures shared by the service tests.
use theorydeck_repository::{EvidenceRepository, MemoryStore, TheoryRepository, UserRepository};
use theorydeck_shared::slug::generate_slug;
use theorydeck_shared::types::{
    EvidenceCard, NewEvidenceCard, NewTheory, NewUser, Stance, Theory, TheoryStatus, User, UserRole,
};

pub(crate) async fn seed_user(store: &MemoryStore, email: &str, role: UserRole) -> User {
    store
        .create_user(&NewUser {
            email: email.to_string(),
            name: None,
            role,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_theory(store: &MemoryStore, author: &User, title: &str) -> Theory {
    store
        .create_theory(&NewTheory {
            slug: generate_slug(title),
            title: title.to_string(),
            claim: format!("{title}, and the evidence shows it."),
            tldr: "Read the cards below.".to_string(),
            realm: None,
            topic: None,
            tags: Vec::new(),
            status: TheoryStatus::Active,
            author_id: author.id,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_card(store: &MemoryStore, theory: &Theory, author: &User, stance: Stance) -> EvidenceCard {
    store
        .create_card(&NewEvidenceCard {
            theory_id: theory.id,
            author_id: author.id,
            content: "An eyewitness account from 1974.".to_string(),
            source: None,
            source_title: None,
            context: None,
            stance,
        })
        .await
        .unwrap()
}
