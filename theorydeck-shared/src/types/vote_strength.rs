use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Strength a voter assigns to an evidence card.
///
/// The scale is ordinal and discrete: only 0, 2, 5, 8 and 10 exist. Any
/// other integer is rejected at construction, so a `VoteStrength` that made
/// it this far never needs re-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct VoteStrength(u8);

impl VoteStrength {
    pub const NONE: VoteStrength = VoteStrength(0);
    pub const WEAK: VoteStrength = VoteStrength(2);
    pub const MODERATE: VoteStrength = VoteStrength(5);
    pub const STRONG: VoteStrength = VoteStrength(8);
    pub const VERY_STRONG: VoteStrength = VoteStrength(10);

    /// Every accepted strength, weakest first.
    pub const ALL: [VoteStrength; 5] = [
        Self::NONE,
        Self::WEAK,
        Self::MODERATE,
        Self::STRONG,
        Self::VERY_STRONG,
    ];

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            0 => "No confidence",
            2 => "Weak",
            5 => "Moderate",
            8 => "Strong",
            _ => "Very Strong",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.0 {
            0 => "This evidence is irrelevant or misleading",
            2 => "This evidence is weak or circumstantial",
            5 => "This evidence is relevant and moderately convincing",
            8 => "This evidence is strong and well-supported",
            _ => "This evidence is definitive and irrefutable",
        }
    }
}

impl TryFrom<i64> for VoteStrength {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 | 2 | 5 | 8 | 10 => Ok(VoteStrength(value as u8)),
            other => Err(DomainError::InvalidVoteStrength(other)),
        }
    }
}

impl From<VoteStrength> for u8 {
    fn from(strength: VoteStrength) -> Self {
        strength.0
    }
}

impl From<VoteStrength> for i16 {
    fn from(strength: VoteStrength) -> Self {
        i16::from(strength.0)
    }
}

impl fmt::Display for VoteStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
