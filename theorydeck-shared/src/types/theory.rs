use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{TheoryId, TheoryStatus, UserId};

/// A claim posted for the community to argue about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theory {
    pub id: TheoryId,
    pub slug: String,
    pub title: String,
    pub claim: String,
    pub tldr: String,
    pub realm: Option<String>,
    pub topic: Option<String>,
    pub tags: Vec<String>,
    pub status: TheoryStatus,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a theory. The slug is resolved by the caller.
#[derive(Debug, Clone)]
pub struct NewTheory {
    pub slug: String,
    pub title: String,
    pub claim: String,
    pub tldr: String,
    pub realm: Option<String>,
    pub topic: Option<String>,
    pub tags: Vec<String>,
    pub status: TheoryStatus,
    pub author_id: UserId,
}

/// Partial edit of a theory. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TheoryUpdate {
    pub title: Option<String>,
    pub claim: Option<String>,
    pub tldr: Option<String>,
    pub realm: Option<String>,
    pub topic: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TheoryUpdate {
    /// Applies the update on top of an existing theory, without persisting it.
    pub fn apply_to(&self, theory: &Theory) -> Theory {
        let mut merged = theory.clone();
        if let Some(title) = &self.title {
            merged.title = title.clone();
        }
        if let Some(claim) = &self.claim {
            merged.claim = claim.clone();
        }
        if let Some(tldr) = &self.tldr {
            merged.tldr = tldr.clone();
        }
        if let Some(realm) = &self.realm {
            merged.realm = Some(realm.clone());
        }
        if let Some(topic) = &self.topic {
            merged.topic = Some(topic.clone());
        }
        if let Some(tags) = &self.tags {
            merged.tags = tags.clone();
        }
        merged
    }
}

/// Listing filters. `status` falls back to `ACTIVE` when not given.
#[derive(Debug, Clone)]
pub struct TheoryFilter {
    pub status: Option<TheoryStatus>,
    pub realm: Option<String>,
    pub topic: Option<String>,
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl TheoryFilter {
    pub const DEFAULT_LIMIT: u32 = 12;
    pub const MAX_LIMIT: u32 = 100;

    pub fn effective_status(&self) -> TheoryStatus {
        self.status.unwrap_or(TheoryStatus::Active)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }
}

impl Default for TheoryFilter {
    fn default() -> Self {
        Self {
            status: None,
            realm: None,
            topic: None,
            search: None,
            page: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the number of rows matching the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_theory() -> Theory {
        Theory {
            id: Uuid::new_v4(),
            slug: "the-moon-is-hollow".to_string(),
            title: "The moon is hollow".to_string(),
            claim: "The moon rings like a bell when struck.".to_string(),
            tldr: "Seismic data suggests a hollow core.".to_string(),
            realm: None,
            topic: None,
            tags: vec!["space".to_string()],
            status: TheoryStatus::Active,
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_update_only_touches_given_fields() {
        let theory = make_theory();
        let update = TheoryUpdate {
            title: Some("The moon is mostly hollow".to_string()),
            realm: Some("Science".to_string()),
            ..Default::default()
        };

        let merged = update.apply_to(&theory);
        assert_eq!(merged.title, "The moon is mostly hollow");
        assert_eq!(merged.realm.as_deref(), Some("Science"));
        assert_eq!(merged.claim, theory.claim);
        assert_eq!(merged.tags, theory.tags);
    }

    #[test]
    fn test_filter_defaults_to_active() {
        let filter = TheoryFilter::default();
        assert_eq!(filter.effective_status(), TheoryStatus::Active);
        assert_eq!(filter.limit, 12);
        let filter = TheoryFilter { page: 3, limit: 10, ..Default::default() };
        assert_eq!(filter.offset(), 30);
    }
}
