//! Lifecycle and classification enums.
//!
//! Every enum here is persisted as text and travels over the wire in
//! `SCREAMING_SNAKE_CASE`, so each one gets a matching `as_str` / `FromStr`
//! pair generated by `text_enum!`.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(DomainError::unknown($kind, other)),
                }
            }
        }
    };
}

text_enum! {
    /// Lifecycle of a theory. Only `Active` theories are listed by default.
    TheoryStatus, "theory status" {
        Draft => "DRAFT",
        Active => "ACTIVE",
        Archived => "ARCHIVED",
        Resolved => "RESOLVED",
        /// Taken down by a moderator.
        Moderated => "MODERATED",
    }
}

text_enum! {
    /// Visibility of an evidence card. Only `Active` cards are shown and scored.
    CardStatus, "card status" {
        Active => "ACTIVE",
        Hidden => "HIDDEN",
        Flagged => "FLAGGED",
        Deleted => "DELETED",
    }
}

text_enum! {
    /// Which side of the claim an evidence card argues.
    Stance, "stance" {
        For => "FOR",
        Against => "AGAINST",
    }
}

text_enum! {
    UserRole, "user role" {
        User => "USER",
        Moderator => "MODERATOR",
        Admin => "ADMIN",
    }
}

text_enum! {
    ReportReason, "report reason" {
        Spam => "SPAM",
        Misinformation => "MISINFORMATION",
        Inappropriate => "INAPPROPRIATE",
        Spoiler => "SPOILER",
        Leak => "LEAK",
        Duplicate => "DUPLICATE",
        Other => "OTHER",
    }
}

text_enum! {
    ReportStatus, "report status" {
        Pending => "PENDING",
        Reviewed => "REVIEWED",
        Resolved => "RESOLVED",
        Dismissed => "DISMISSED",
    }
}

impl TheoryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TheoryStatus::Draft => "Draft",
            TheoryStatus::Active => "Active",
            TheoryStatus::Archived => "Archived",
            TheoryStatus::Resolved => "Resolved",
            TheoryStatus::Moderated => "Moderated",
        }
    }
}

impl UserRole {
    /// Moderators and admins may act on reports and other people's content.
    pub fn can_moderate(&self) -> bool {
        matches!(self, UserRole::Moderator | UserRole::Admin)
    }

    pub fn can_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl ReportStatus {
    /// Whether moving a report into this status closes it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Resolved | ReportStatus::Dismissed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_variant_back_from_its_text() {
        for status in CardStatus::ALL {
            assert_eq!(status.as_str().parse::<CardStatus>().unwrap(), *status);
        }
        for reason in ReportReason::ALL {
            assert_eq!(reason.as_str().parse::<ReportReason>().unwrap(), *reason);
        }
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let err = "SHOUTING".parse::<ReportReason>().unwrap_err();
        assert_eq!(err, DomainError::unknown("report reason", "SHOUTING"));
        assert!("active".parse::<TheoryStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Stance::Against).unwrap();
        assert_eq!(json, "\"AGAINST\"");
        let role: UserRole = serde_json::from_str("\"MODERATOR\"").unwrap();
        assert_eq!(role, UserRole::Moderator);
    }

    #[test]
    fn test_role_capabilities() {
        assert!(!UserRole::User.can_moderate());
        assert!(UserRole::Moderator.can_moderate());
        assert!(!UserRole::Moderator.can_admin());
        assert!(UserRole::Admin.can_moderate());
        assert!(UserRole::Admin.can_admin());
    }

    #[test]
    fn test_terminal_report_statuses() {
        assert!(ReportStatus::Resolved.is_terminal());
        assert!(ReportStatus::Dismissed.is_terminal());
        assert!(!ReportStatus::Reviewed.is_terminal());
        assert!(!ReportStatus::Pending.is_terminal());
    }
}
