use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CardId, UserId, VoteId, VoteStrength};

/// A user's strength rating of one evidence card.
///
/// At most one vote exists per `(user_id, card_id)`; re-voting rewrites
/// `strength` in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: VoteId,
    pub card_id: CardId,
    pub user_id: UserId,
    pub strength: VoteStrength,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
