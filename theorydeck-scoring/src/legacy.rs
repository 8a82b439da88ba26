//! Flat vote-weighted balance from an older listing view.
//!
//! This formula averages every vote of every active card and maps the
//! result from `[-10, +10]` onto `[0, 100]`. Strengths are never negative
//! (the scale is 0, 2, 5, 8, 10), so the output can only land in `[50, 100]`
//! and a theory nobody finds convincing still reads as a neutral 50%.
//! It is kept to pin that behaviour in tests; responses use
//! [`crate::theory::theory_vote_stats`].
use theorydeck_shared::types::VoteStrength;

/// Returns the legacy FOR percentage, or `None` when there are no votes.
pub fn flat_vote_balance(strengths: &[VoteStrength]) -> Option<f64> {
    if strengths.is_empty() {
        return None;
    }
    let sum: f64 = strengths.iter().map(|s| f64::from(s.value())).sum();
    let average = sum / strengths.len() as f64;
    Some(((average + 10.0) / 20.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanimous_strong_votes_read_as_full_confidence() {
        let votes = [VoteStrength::VERY_STRONG; 4];
        assert_eq!(flat_vote_balance(&votes), Some(100.0));
    }

    #[test]
    fn test_zero_strength_votes_collapse_to_neutral() {
        let votes = [VoteStrength::NONE; 3];
        assert_eq!(flat_vote_balance(&votes), Some(50.0));
    }

    #[test]
    fn test_output_never_drops_below_fifty() {
        for strength in VoteStrength::ALL {
            let percent = flat_vote_balance(&[strength]).unwrap();
            assert!((50.0..=100.0).contains(&percent));
        }
    }

    #[test]
    fn test_empty_has_no_balance() {
        assert_eq!(flat_vote_balance(&[]), None);
    }
}
