// src/domain/review/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::ReviewId;
use crate::domain::resource::ResourceKind;
use crate::domain::user::UserId;
use crate::domain::validation::ensure_rating;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

/// Whole stars, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i32) -> DomainResult<Self> {
        let value = ensure_rating(value)?;
        // ensure_rating bounds the value to 1..=5
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: ReviewId,
    pub target_kind: ResourceKind,
    pub target_id: i64,
    pub user_id: UserId,
    pub author_name: String,
    pub rating: Rating,
    pub title: Option<String>,
    pub comment: String,
    pub helpful_votes: i64,
    pub reported: bool,
    pub report_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub target_kind: ResourceKind,
    pub target_id: i64,
    pub user_id: UserId,
    pub rating: Rating,
    pub title: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    #[default]
    Newest,
    Helpful,
    Rating,
}

impl FromStr for ReviewSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" | "recent" => Ok(ReviewSort::Newest),
            "helpful" => Ok(ReviewSort::Helpful),
            "rating" => Ok(ReviewSort::Rating),
            other => Err(DomainError::invalid(
                "sort",
                format!("unknown review sort '{other}'"),
            )),
        }
    }
}
