// src/application/commands/reviews/aggregates.rs
use super::ReviewCommandService;
use crate::{
    application::error::ApplicationResult, domain::derived::ReviewAggregate,
    domain::resource::ResourceKind,
};
use tracing::debug;

impl ReviewCommandService {
    /// Rebuilds `rating` and `review_count` of a reviewed record from its
    /// current reviews, under the record's row lock.
    pub async fn recompute_aggregates(
        &self,
        kind: ResourceKind,
        target_id: i64,
    ) -> ApplicationResult<ReviewAggregate> {
        let aggregate = self.reviews.refresh_aggregate(kind, target_id).await?;
        debug!(
            %kind,
            target_id,
            rating = ?aggregate.rating,
            review_count = aggregate.review_count,
            "recomputed review aggregate"
        );
        Ok(aggregate)
    }
}
