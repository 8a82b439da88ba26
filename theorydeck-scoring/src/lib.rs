//! # TheoryDeck Scoring
//! Turns raw evidence votes into the numbers shown next to a theory.
//!
//! Per card, the live vote set is reduced to a count and an average strength
//! (`card`). Per theory, the active cards are rolled up into a FOR/AGAINST
//! balance weighted by how many votes each card received (`theory`).
//! Nothing here is cached: callers recompute from the current votes on every
//! read.
pub mod card;
pub mod confidence;
pub mod legacy;
pub mod theory;

pub use card::{card_vote_stats, round_to_tenth};
pub use confidence::ConfidenceLevel;
pub use theory::{theory_vote_stats, ScoredCard, NEUTRAL_PERCENT};
