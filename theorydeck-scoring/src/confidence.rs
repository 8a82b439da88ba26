use serde::{Deserialize, Serialize};

/// Presentation bucket for a FOR percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            80.. => ConfidenceLevel::VeryHigh,
            65..=79 => ConfidenceLevel::High,
            45..=64 => ConfidenceLevel::Moderate,
            30..=44 => ConfidenceLevel::Low,
            _ => ConfidenceLevel::VeryLow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => "Very Low",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Moderate => "Moderate",
            ConfidenceLevel::High => "High",
            ConfidenceLevel::VeryHigh => "Very High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(ConfidenceLevel::from_percent(0), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::from_percent(29), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::from_percent(30), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_percent(44), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_percent(45), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_percent(64), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_percent(65), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_percent(79), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_percent(80), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_percent(100), ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_neutral_split_is_moderate() {
        assert_eq!(ConfidenceLevel::from_percent(50).label(), "Moderate");
    }
}
