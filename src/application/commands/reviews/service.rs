// src/application/commands/reviews/service.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, HelpfulVotesDto, ReviewDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        access::{OwnerOrAnySpec, Specification},
        errors::DomainError,
        ids::ReviewId,
        resource::{RecordLookup, ResourceKind},
        review::{NewReview, Rating, Review, ReviewRepository},
        validation::{ensure_max_len, required_text},
    },
};
use tracing::{debug, info};

pub const MAX_REVIEW_TITLE_LEN: usize = 200;
pub const MAX_COMMENT_LEN: usize = 5_000;
pub const MAX_REPORT_REASON_LEN: usize = 500;

pub struct AddReviewCommand {
    pub target_kind: ResourceKind,
    pub target_id: i64,
    pub rating: i32,
    pub title: Option<String>,
    pub comment: String,
}

pub struct ReviewCommandService {
    pub(super) reviews: Arc<dyn ReviewRepository>,
    pub(super) records: Arc<dyn RecordLookup>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ReviewCommandService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        records: Arc<dyn RecordLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reviews,
            records,
            clock,
        }
    }

    /// One review per principal and target; owners cannot review their own records.
    pub async fn add_review(
        &self,
        actor: &AuthenticatedUser,
        command: AddReviewCommand,
    ) -> ApplicationResult<ReviewDto> {
        ensure_capability(actor, "reviews", "create")?;
        let kind = command.target_kind;
        kind.ensure_reviewable()?;
        let rating = Rating::new(command.rating)?;
        let comment = required_text("comment", command.comment, MAX_COMMENT_LEN)?;
        let title = command
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if let Some(title) = title.as_deref() {
            ensure_max_len("title", title, MAX_REVIEW_TITLE_LEN)?;
        }

        let owner = self
            .records
            .owner_of(kind, command.target_id)
            .await?
            .ok_or_else(|| ApplicationError::missing(kind.profile().label, command.target_id))?;
        if owner == actor.id {
            return Err(ApplicationError::forbidden(format!(
                "you cannot review your own {}",
                kind.profile().label
            )));
        }
        if self
            .reviews
            .find_by_author(kind, command.target_id, actor.id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "you have already reviewed this {}",
                kind.profile().label
            ))
            .into());
        }

        let (review, aggregate) = self
            .reviews
            .insert(NewReview {
                target_kind: kind,
                target_id: command.target_id,
                user_id: actor.id,
                rating,
                title,
                comment,
                created_at: self.clock.now(),
            })
            .await?;
        debug!(
            %kind,
            target_id = review.target_id,
            rating = ?aggregate.rating,
            review_count = aggregate.review_count,
            "review added"
        );

        Ok(review.into())
    }

    /// Author or `reviews:delete:any`; the parent's aggregate is recomputed
    /// in the same transaction as the delete.
    pub async fn delete_review(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let review = self.load(id).await?;
        let spec = OwnerOrAnySpec::new(
            &actor.capabilities,
            "reviews",
            "delete",
            review.user_id,
            actor.id,
        );
        if !spec.is_satisfied() {
            return Err(ApplicationError::forbidden("not allowed to delete this review"));
        }

        let aggregate = self.reviews.delete(review.id).await?;
        info!(
            review_id = %review.id,
            kind = %review.target_kind,
            target_id = review.target_id,
            review_count = aggregate.review_count,
            "deleted review"
        );
        Ok(())
    }

    pub async fn mark_helpful(&self, id: i64) -> ApplicationResult<HelpfulVotesDto> {
        let helpful_votes = self.reviews.increment_helpful(ReviewId::new(id)?).await?;
        Ok(HelpfulVotesDto { helpful_votes })
    }

    pub async fn report_review(
        &self,
        id: i64,
        reason: Option<String>,
    ) -> ApplicationResult<ReviewDto> {
        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        if let Some(reason) = reason.as_deref() {
            ensure_max_len("reason", reason, MAX_REPORT_REASON_LEN)?;
        }
        let review = self.load(id).await?;
        let reported = self.reviews.mark_reported(review.id, reason).await?;
        info!(review_id = %reported.id, "review reported");
        Ok(reported.into())
    }

    async fn load(&self, id: i64) -> ApplicationResult<Review> {
        let id = ReviewId::new(id)?;
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("review", id))
    }
}
