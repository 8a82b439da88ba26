// App state for the Axum server
use std::sync::Arc;

use theorydeck_repository::Store;
use theorydeck_service::{EvidenceService, ReportService, TheoryService, UserService, VoteService};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub theories: Arc<TheoryService>,
    pub evidence: Arc<EvidenceService>,
    pub votes: Arc<VoteService>,
    pub reports: Arc<ReportService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, allow_self_vote: bool) -> Self {
        Self {
            users: Arc::new(UserService::new(store.clone())),
            theories: Arc::new(TheoryService::new(store.clone())),
            evidence: Arc::new(EvidenceService::new(store.clone())),
            votes: Arc::new(VoteService::new(store.clone(), allow_self_vote)),
            reports: Arc::new(ReportService::new(store)),
        }
    }
}
