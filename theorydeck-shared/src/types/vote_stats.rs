use serde::{Deserialize, Serialize};

/// Aggregate of the votes recorded on a single evidence card.
///
/// `average_strength` is `0.0` when `count == 0`; callers that need to tell
/// "no votes yet" apart from "everyone voted 0" must look at `count`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVoteStats {
    pub count: u32,
    pub average_strength: f64,
}

impl CardVoteStats {
    pub fn has_votes(&self) -> bool {
        self.count > 0
    }
}

/// FOR/AGAINST balance of a theory derived from its active cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoryVoteStats {
    pub for_score: f64,
    pub against_score: f64,
    pub total_votes: u32,
    pub for_percent: u8,
    pub against_percent: u8,
}
