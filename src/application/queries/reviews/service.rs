// src/application/queries/reviews/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::ReviewDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        resource::{RecordLookup, ResourceKind},
        review::{ReviewRepository, ReviewSort},
    },
};

pub struct ReviewQueryService {
    reviews: Arc<dyn ReviewRepository>,
    records: Arc<dyn RecordLookup>,
}

impl ReviewQueryService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, records: Arc<dyn RecordLookup>) -> Self {
        Self { reviews, records }
    }

    pub async fn list_reviews(
        &self,
        kind: ResourceKind,
        target_id: i64,
        sort: ReviewSort,
    ) -> ApplicationResult<Vec<ReviewDto>> {
        kind.ensure_reviewable()?;
        if self.records.owner_of(kind, target_id).await?.is_none() {
            return Err(ApplicationError::missing(kind.profile().label, target_id));
        }

        let reviews = self.reviews.list_for_target(kind, target_id, sort).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }
}
