// src/application/dto/reviews.rs
use crate::domain::resource::ResourceKind;
use crate::domain::review::Review;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i64,
    pub target_kind: ResourceKind,
    pub target_id: i64,
    pub user_id: i64,
    pub author_name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
    pub helpful_votes: i64,
    pub reported: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.into(),
            target_kind: review.target_kind,
            target_id: review.target_id,
            user_id: review.user_id.into(),
            author_name: review.author_name,
            rating: review.rating.value(),
            title: review.title,
            comment: review.comment,
            helpful_votes: review.helpful_votes,
            reported: review.reported,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpfulVotesDto {
    pub helpful_votes: i64,
}
