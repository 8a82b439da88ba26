use theorydeck_shared::types::{CardVoteStats, VoteStrength};

/// Rounds to one decimal place, halves away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reduces the votes of one card to its count and average strength.
///
/// An empty vote set yields `{ count: 0, average_strength: 0.0 }`.
pub fn card_vote_stats<I>(strengths: I) -> CardVoteStats
where
    I: IntoIterator<Item = VoteStrength>,
{
    let (count, sum) = strengths
        .into_iter()
        .fold((0u32, 0u64), |(count, sum), strength| {
            (count + 1, sum + u64::from(strength.value()))
        });

    if count == 0 {
        return CardVoteStats::default();
    }

    CardVoteStats {
        count,
        average_strength: round_to_tenth(sum as f64 / f64::from(count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strengths(values: &[i64]) -> Vec<VoteStrength> {
        values
            .iter()
            .map(|v| VoteStrength::try_from(*v).unwrap())
            .collect()
    }

    #[test]
    fn test_average_of_extremes() {
        let stats = card_vote_stats(strengths(&[0, 10]));
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_strength, 5.0);
    }

    #[test]
    fn test_no_votes_is_zero_but_distinguishable() {
        let empty = card_vote_stats(Vec::new());
        assert_eq!(empty, CardVoteStats { count: 0, average_strength: 0.0 });
        assert!(!empty.has_votes());

        let all_zero = card_vote_stats(strengths(&[0, 0]));
        assert_eq!(all_zero.average_strength, 0.0);
        assert!(all_zero.has_votes());
    }

    #[test]
    fn test_average_is_rounded_to_one_decimal() {
        // 17 / 3 = 5.666...
        let stats = card_vote_stats(strengths(&[2, 5, 10]));
        assert_eq!(stats.average_strength, 5.7);
        // 10 / 3 = 3.333...
        let stats = card_vote_stats(strengths(&[0, 0, 10]));
        assert_eq!(stats.average_strength, 3.3);
    }

    #[test]
    fn test_round_to_tenth_halves_go_up() {
        assert_eq!(round_to_tenth(6.25), 6.3);
        assert_eq!(round_to_tenth(4.0), 4.0);
    }
}
