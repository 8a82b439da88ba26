//! This module defines and re-exports the interfaces for the repository.
//! It serves as a central point for accessing traits related to data interaction.
mod evidence;
mod reports;
mod theories;
mod users;
mod votes;

pub use evidence::EvidenceRepository;
pub use reports::ReportRepository;
pub use theories::TheoryRepository;
pub use users::UserRepository;
pub use votes::VoteRepository;

/// Every repository a running server needs, behind one trait object.
pub trait Store:
    UserRepository + TheoryRepository + EvidenceRepository + VoteRepository + ReportRepository
{
}

impl<T> Store for T where
    T: UserRepository + TheoryRepository + EvidenceRepository + VoteRepository + ReportRepository
{
}
