//! Field-level validation of user submitted forms.
//!
//! Validators collect every failing field instead of stopping at the first
//! one, so the caller can report them all at once.
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::types::Stance;

/// Failing fields mapped to a human readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`, replacing an earlier one for the same field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join("; "))
    }
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
    min_message: &str,
    max_message: &str,
) {
    match value {
        Some(v) if v.trim().chars().count() >= min => {}
        _ => errors.add(field, min_message),
    }
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.add(field, max_message);
        }
    }
}

pub fn validate_theory(title: Option<&str>, claim: Option<&str>, tldr: Option<&str>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_length(
        &mut errors,
        "title",
        title,
        5,
        200,
        "Title must be at least 5 characters",
        "Title must be less than 200 characters",
    );
    check_length(
        &mut errors,
        "claim",
        claim,
        10,
        2000,
        "Claim must be at least 10 characters",
        "Claim must be less than 2000 characters",
    );
    check_length(
        &mut errors,
        "tldr",
        tldr,
        10,
        500,
        "TL;DR must be at least 10 characters",
        "TL;DR must be less than 500 characters",
    );
    errors.into_result()
}

pub fn validate_evidence(
    content: Option<&str>,
    stance: Option<Stance>,
    source: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_length(
        &mut errors,
        "content",
        content,
        10,
        2000,
        "Evidence must be at least 10 characters",
        "Evidence must be less than 2000 characters",
    );
    if stance.is_none() {
        errors.add("stance", "Invalid stance");
    }
    if source.is_some_and(|s| s.chars().count() > 500) {
        errors.add("source", "Source URL must be less than 500 characters");
    }
    errors.into_result()
}

/// `local@domain.tld` shape: no whitespace, one `@`, a dot after it.
static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Loose shape check; deliverability is not our concern.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}
