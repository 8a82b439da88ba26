//! Ownership-aware permission predicates.
//!
//! Roles are a flat enumeration checked through capability predicates
//! (`UserRole::can_moderate`, `UserRole::can_admin`); these helpers combine
//! them with authorship.
use crate::types::{UserId, UserRole};

pub fn can_edit_theory(caller: UserId, author: UserId, role: UserRole) -> bool {
    caller == author || role.can_moderate()
}

/// Deleting a theory is reserved to its author and admins.
pub fn can_delete_theory(caller: UserId, author: UserId, role: UserRole) -> bool {
    caller == author || role.can_admin()
}

pub fn can_edit_evidence(caller: UserId, author: UserId, role: UserRole) -> bool {
    caller == author || role.can_moderate()
}

pub fn can_delete_evidence(caller: UserId, author: UserId, role: UserRole) -> bool {
    caller == author || role.can_moderate()
}

pub fn can_resolve_report(role: UserRole) -> bool {
    role.can_moderate()
}
