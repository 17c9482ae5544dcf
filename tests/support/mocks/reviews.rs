// tests/support/mocks/reviews.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use trailhead_core::domain::derived::ReviewAggregate;
use trailhead_core::domain::errors::{DomainError, DomainResult};
use trailhead_core::domain::ids::ReviewId;
use trailhead_core::domain::resource::ResourceKind;
use trailhead_core::domain::review::{NewReview, Review, ReviewRepository, ReviewSort};
use trailhead_core::domain::user::UserId;

#[derive(Default)]
pub struct InMemoryReviews {
    reviews: Mutex<Vec<Review>>,
    aggregates: Mutex<HashMap<(ResourceKind, i64), ReviewAggregate>>,
    ids: AtomicI64,
}

impl InMemoryReviews {
    /// Last aggregate written onto the reviewed record.
    pub fn aggregate(&self, kind: ResourceKind, target_id: i64) -> Option<ReviewAggregate> {
        self.aggregates
            .lock()
            .unwrap()
            .get(&(kind, target_id))
            .copied()
    }

    /// Called with the review list locked, which stands in for the target
    /// row lock the Postgres repository takes.
    fn rewrite_aggregate(
        &self,
        reviews: &[Review],
        kind: ResourceKind,
        target_id: i64,
    ) -> ReviewAggregate {
        let aggregate = ReviewAggregate::from_ratings(
            reviews
                .iter()
                .filter(|r| r.target_kind == kind && r.target_id == target_id)
                .map(|r| r.rating)
                .collect::<Vec<_>>(),
        );
        self.aggregates
            .lock()
            .unwrap()
            .insert((kind, target_id), aggregate);
        aggregate
    }

    fn with_review<T>(&self, id: ReviewId, f: impl FnOnce(&mut Review) -> T) -> DomainResult<T> {
        let mut reviews = self.reviews.lock().unwrap();
        reviews
            .iter_mut()
            .find(|r| r.id == id)
            .map(f)
            .ok_or_else(|| DomainError::NotFound(format!("review {id} not found")))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviews {
    async fn insert(&self, review: NewReview) -> DomainResult<(Review, ReviewAggregate)> {
        let mut reviews = self.reviews.lock().unwrap();
        if reviews.iter().any(|r| {
            r.target_kind == review.target_kind
                && r.target_id == review.target_id
                && r.user_id == review.user_id
        }) {
            return Err(DomainError::Conflict(
                "you have already reviewed this record".into(),
            ));
        }
        let stored = Review {
            id: ReviewId(self.ids.fetch_add(1, Ordering::SeqCst) + 1),
            target_kind: review.target_kind,
            target_id: review.target_id,
            user_id: review.user_id,
            author_name: format!("user-{}", review.user_id),
            rating: review.rating,
            title: review.title,
            comment: review.comment,
            helpful_votes: 0,
            reported: false,
            report_reason: None,
            created_at: review.created_at,
        };
        reviews.push(stored.clone());
        let aggregate = self.rewrite_aggregate(&reviews, stored.target_kind, stored.target_id);
        Ok((stored, aggregate))
    }

    async fn find_by_id(&self, id: ReviewId) -> DomainResult<Option<Review>> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_author(
        &self,
        kind: ResourceKind,
        target_id: i64,
        user_id: UserId,
    ) -> DomainResult<Option<Review>> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.target_kind == kind && r.target_id == target_id && r.user_id == user_id)
            .cloned())
    }

    async fn list_for_target(
        &self,
        kind: ResourceKind,
        target_id: i64,
        sort: ReviewSort,
    ) -> DomainResult<Vec<Review>> {
        let mut matching: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.target_kind == kind && r.target_id == target_id)
            .cloned()
            .collect();
        match sort {
            ReviewSort::Newest => {
                matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)))
            }
            ReviewSort::Helpful => {
                matching.sort_by(|a, b| (b.helpful_votes, b.id).cmp(&(a.helpful_votes, a.id)))
            }
            ReviewSort::Rating => matching.sort_by(|a, b| (b.rating, b.id).cmp(&(a.rating, a.id))),
        }
        Ok(matching)
    }

    async fn increment_helpful(&self, id: ReviewId) -> DomainResult<i64> {
        self.with_review(id, |review| {
            review.helpful_votes += 1;
            review.helpful_votes
        })
    }

    async fn mark_reported(&self, id: ReviewId, reason: Option<String>) -> DomainResult<Review> {
        self.with_review(id, |review| {
            review.reported = true;
            review.report_reason = reason;
            review.clone()
        })
    }

    async fn delete(&self, id: ReviewId) -> DomainResult<ReviewAggregate> {
        let mut reviews = self.reviews.lock().unwrap();
        let removed = reviews
            .iter()
            .position(|r| r.id == id)
            .map(|at| reviews.remove(at))
            .ok_or_else(|| DomainError::NotFound(format!("review {id} not found")))?;
        Ok(self.rewrite_aggregate(&reviews, removed.target_kind, removed.target_id))
    }

    async fn refresh_aggregate(
        &self,
        kind: ResourceKind,
        target_id: i64,
    ) -> DomainResult<ReviewAggregate> {
        let reviews = self.reviews.lock().unwrap();
        Ok(self.rewrite_aggregate(&reviews, kind, target_id))
    }
}
