mod evidence_card;
mod report;
mod status;
mod theory;
mod user;
mod vote;
mod vote_stats;
mod vote_strength;

use uuid::Uuid;

pub type UserId = Uuid;
pub type TheoryId = Uuid;
pub type CardId = Uuid;
pub type VoteId = Uuid;
pub type ReportId = Uuid;

pub use evidence_card::{EvidenceCard, EvidenceCardUpdate, NewEvidenceCard};
pub use report::{ModerationAction, NewReport, Report};
pub use status::{CardStatus, ReportReason, ReportStatus, Stance, TheoryStatus, UserRole};
pub use theory::{NewTheory, Page, Theory, TheoryFilter, TheoryUpdate};
pub use user::{NewUser, User, UserUpdate};
pub use vote::Vote;
pub use vote_stats::{CardVoteStats, TheoryVoteStats};
pub use vote_strength::VoteStrength;
