//! Theory-level FOR/AGAINST balance.
//!
//! Each card contributes `average_strength * count` to its side, so a card
//! with many weak votes can outweigh one with a few strong votes. Cards that
//! are not `ACTIVE`, or that have no votes yet, contribute nothing.
use theorydeck_shared::types::{CardStatus, CardVoteStats, Stance, TheoryVoteStats};

/// Percentage reported for both sides while there is no signal at all.
pub const NEUTRAL_PERCENT: u8 = 50;

/// The slice of an evidence card the rollup needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCard {
    pub stance: Stance,
    pub status: CardStatus,
    pub stats: CardVoteStats,
}

impl ScoredCard {
    fn weighted_score(&self) -> f64 {
        if self.stats.has_votes() {
            self.stats.average_strength * f64::from(self.stats.count)
        } else {
            0.0
        }
    }
}

/// Rolls the active cards of a theory into its vote balance.
pub fn theory_vote_stats<'a, I>(cards: I) -> TheoryVoteStats
where
    I: IntoIterator<Item = &'a ScoredCard>,
{
    let mut for_score = 0.0;
    let mut against_score = 0.0;
    let mut total_votes = 0u32;

    for card in cards.into_iter().filter(|c| c.status == CardStatus::Active) {
        total_votes += card.stats.count;
        match card.stance {
            Stance::For => for_score += card.weighted_score(),
            Stance::Against => against_score += card.weighted_score(),
        }
    }

    let total = for_score + against_score;
    let (for_percent, against_percent) = if total > 0.0 {
        let for_percent = ((for_score / total) * 100.0).round().clamp(0.0, 100.0) as u8;
        (for_percent, 100 - for_percent)
    } else {
        (NEUTRAL_PERCENT, NEUTRAL_PERCENT)
    };

    TheoryVoteStats {
        for_score,
        against_score,
        total_votes,
        for_percent,
        against_percent,
    }
}
