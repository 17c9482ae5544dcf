// src/domain/derived.rs
//! Fields computed from other fields at write time.
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::review::Rating;
use serde::Serialize;
use std::fmt;

pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time in whole minutes, never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReadTime(u32);

impl ReadTime {
    pub fn from_content(content: &str) -> DomainResult<Self> {
        if content.trim().is_empty() {
            return Err(DomainError::invalid(
                "content",
                "content is required to estimate read time",
            ));
        }
        Ok(Self::from_word_count(content.split_whitespace().count()))
    }

    pub fn from_word_count(words: usize) -> Self {
        let minutes = (words as f64 / WORDS_PER_MINUTE as f64).round_ties_even();
        Self((minutes as u32).max(1))
    }

    /// Rehydrates a stored value.
    pub fn from_minutes(minutes: i32) -> DomainResult<Self> {
        u32::try_from(minutes)
            .ok()
            .filter(|m| *m >= 1)
            .map(Self)
            .ok_or_else(|| DomainError::Persistence(format!("invalid stored read time {minutes}")))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.0)
    }
}

/// Average rating and count summarising the reviews of one record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAggregate {
    pub rating: Option<f64>,
    pub review_count: u32,
}

impl ReviewAggregate {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0u64, 0u32), |(sum, count), rating| {
                (sum + u64::from(rating.value()), count + 1)
            });
        if count == 0 {
            return Self::empty();
        }
        let tenths = (sum as f64 * 10.0 / f64::from(count)).round_ties_even();
        Self {
            rating: Some(tenths / 10.0),
            review_count: count,
        }
    }
}
