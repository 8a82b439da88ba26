use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{UserId, UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}

/// Administrative changes to a user. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub role: Option<UserRole>,
    pub name: Option<String>,
}
