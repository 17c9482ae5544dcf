// src/domain/slug/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::Serialize;
use std::fmt;

pub const MAX_SLUG_LEN: usize = 255;

/// Lowercase, hyphen separated identifier: `[a-z0-9]+(-[a-z0-9]+)*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !is_valid_slug(&value) {
            return Err(DomainError::invalid(
                "slug",
                "slug must be lowercase alphanumeric words separated by single hyphens",
            ));
        }
        if value.len() > MAX_SLUG_LEN {
            return Err(DomainError::invalid(
                "slug",
                format!("slug must be at most {MAX_SLUG_LEN} characters"),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

/// What happens to an existing slug when the source title is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugPolicy {
    Immutable,
    RegenerateOnTitleChange,
}

/// Suffix appended to a colliding base slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguator {
    /// Eight lowercase hex characters.
    RandomSuffix,
    /// `YYYYMMDD-HHMMSS` from the clock.
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugRules {
    pub policy: SlugPolicy,
    pub disambiguator: Disambiguator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_lowercase_words() {
        assert!(Slug::new("my-first-trip").is_ok());
        assert!(Slug::new("trip-20240115-103000").is_ok());
        assert!(Slug::new("a1b2c3d4").is_ok());
    }

    #[test]
    fn rejects_anything_outside_the_pattern() {
        for bad in ["", "-trip", "trip-", "my--trip", "My-Trip", "trip_1", "caf\u{e9}"] {
            let err = Slug::new(bad).unwrap_err();
            assert_eq!(err.field(), Some("slug"), "{bad:?} should be rejected");
        }
    }
}
