// src/domain/review/repository.rs
use crate::domain::derived::ReviewAggregate;
use crate::domain::errors::DomainResult;
use crate::domain::ids::ReviewId;
use crate::domain::resource::ResourceKind;
use crate::domain::review::entity::{NewReview, Review, ReviewSort};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Stores the review and rewrites the target's aggregate in one
    /// transaction that holds the target row lock. `Conflict` when the
    /// principal already reviewed the target.
    async fn insert(&self, review: NewReview) -> DomainResult<(Review, ReviewAggregate)>;
    async fn find_by_id(&self, id: ReviewId) -> DomainResult<Option<Review>>;
    async fn find_by_author(
        &self,
        kind: ResourceKind,
        target_id: i64,
        user_id: UserId,
    ) -> DomainResult<Option<Review>>;
    async fn list_for_target(
        &self,
        kind: ResourceKind,
        target_id: i64,
        sort: ReviewSort,
    ) -> DomainResult<Vec<Review>>;
    /// Atomic `helpful_votes = helpful_votes + 1`; returns the new count.
    async fn increment_helpful(&self, id: ReviewId) -> DomainResult<i64>;
    async fn mark_reported(&self, id: ReviewId, reason: Option<String>) -> DomainResult<Review>;
    /// Removes the review and rewrites its target's aggregate, atomically.
    async fn delete(&self, id: ReviewId) -> DomainResult<ReviewAggregate>;
    /// Recomputes `rating` and `review_count` of the target from its current
    /// reviews while holding the target row lock.
    async fn refresh_aggregate(
        &self,
        kind: ResourceKind,
        target_id: i64,
    ) -> DomainResult<ReviewAggregate>;
}
