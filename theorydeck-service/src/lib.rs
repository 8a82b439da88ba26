//! # TheoryDeck Service
//! Domain operations on top of the repository layer.
//!
//! Each service owns a shared `Arc<dyn Store>` and enforces validation and
//! permissions before touching it. Scores are never stored: every read
//! recomputes them from the live vote set through `theorydeck-scoring`.
pub mod errors;
pub mod evidence;
pub mod reports;
pub mod theories;
pub mod users;
pub mod views;
pub mod votes;

#[cfg(test)]
mod test_support;

pub use errors::ServiceError;
pub use evidence::{EvidenceInput, EvidenceService};
pub use reports::{ReportInput, ReportResolution, ReportService};
pub use theories::{TheoryInput, TheoryService};
pub use users::{RegisterInput, UserService};
pub use views::{AuthorView, CardView, TheoryDetail, TheoryPage, TheorySummary};
pub use votes::VoteService;
