// src/infrastructure/repositories/postgres_review.rs
use super::{map_sqlx, postgres_lookup::table_of};
use crate::domain::derived::ReviewAggregate;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::ReviewId;
use crate::domain::resource::ResourceKind;
use crate::domain::review::{NewReview, Rating, Review, ReviewRepository, ReviewSort};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};

const REVIEW_COLUMNS: &str = "r.id, r.target_kind, r.target_id, r.user_id, \
     u.username AS author_name, r.rating, r.title, r.comment, r.helpful_votes, r.reported, \
     r.report_reason, r.created_at";

#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    id: i64,
    target_kind: String,
    target_id: i64,
    user_id: i64,
    author_name: String,
    rating: i16,
    title: Option<String>,
    comment: String,
    helpful_votes: i64,
    reported: bool,
    report_reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DomainError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: ReviewId::new(row.id)?,
            target_kind: row.target_kind.parse()?,
            target_id: row.target_id,
            user_id: UserId::new(row.user_id)?,
            author_name: row.author_name,
            rating: Rating::new(i32::from(row.rating))?,
            title: row.title,
            comment: row.comment,
            helpful_votes: row.helpful_votes,
            reported: row.reported,
            report_reason: row.report_reason,
            created_at: row.created_at,
        })
    }
}

fn order_clause(sort: ReviewSort) -> &'static str {
    match sort {
        ReviewSort::Newest => "r.created_at DESC, r.id DESC",
        ReviewSort::Helpful => "r.helpful_votes DESC, r.created_at DESC, r.id DESC",
        ReviewSort::Rating => "r.rating DESC, r.created_at DESC, r.id DESC",
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn insert(&self, review: NewReview) -> DomainResult<(Review, ReviewAggregate)> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        lock_target(&mut tx, review.target_kind, review.target_id).await?;

        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "WITH r AS (
                 INSERT INTO reviews (target_kind, target_id, user_id, rating, title, comment,
                     created_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING *
             )
             SELECT {REVIEW_COLUMNS} FROM r JOIN users u ON u.id = r.user_id"
        ))
        .bind(review.target_kind.as_str())
        .bind(review.target_id)
        .bind(i64::from(review.user_id))
        .bind(i16::from(review.rating.value()))
        .bind(review.title)
        .bind(review.comment)
        .bind(review.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        let stored = Review::try_from(row)?;

        let aggregate = rewrite_aggregate(&mut tx, stored.target_kind, stored.target_id).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok((stored, aggregate))
    }

    async fn find_by_id(&self, id: ReviewId) -> DomainResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Review::try_from).transpose()
    }

    async fn find_by_author(
        &self,
        kind: ResourceKind,
        target_id: i64,
        user_id: UserId,
    ) -> DomainResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.target_kind = $1 AND r.target_id = $2 AND r.user_id = $3"
        ))
        .bind(kind.as_str())
        .bind(target_id)
        .bind(i64::from(user_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Review::try_from).transpose()
    }

    async fn list_for_target(
        &self,
        kind: ResourceKind,
        target_id: i64,
        sort: ReviewSort,
    ) -> DomainResult<Vec<Review>> {
        sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews r JOIN users u ON u.id = r.user_id
             WHERE r.target_kind = $1 AND r.target_id = $2
             ORDER BY {}",
            order_clause(sort)
        ))
        .bind(kind.as_str())
        .bind(target_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Review::try_from)
        .collect()
    }

    async fn increment_helpful(&self, id: ReviewId) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE reviews SET helpful_votes = helpful_votes + 1 WHERE id = $1
             RETURNING helpful_votes",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("review {id} not found")))
    }

    async fn mark_reported(&self, id: ReviewId, reason: Option<String>) -> DomainResult<Review> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "WITH r AS (
                 UPDATE reviews SET reported = TRUE, report_reason = COALESCE($2, report_reason)
                 WHERE id = $1
                 RETURNING *
             )
             SELECT {REVIEW_COLUMNS} FROM r JOIN users u ON u.id = r.user_id"
        ))
        .bind(i64::from(id))
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("review {id} not found")))?;

        Review::try_from(row)
    }

    async fn delete(&self, id: ReviewId) -> DomainResult<ReviewAggregate> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let (kind, target_id) = sqlx::query_as::<_, (String, i64)>(
            "SELECT target_kind, target_id FROM reviews WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("review {id} not found")))?;
        let kind: ResourceKind = kind.parse()?;
        lock_target(&mut tx, kind, target_id).await?;

        let removed = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .rows_affected();
        if removed == 0 {
            return Err(DomainError::NotFound(format!("review {id} not found")));
        }

        let aggregate = rewrite_aggregate(&mut tx, kind, target_id).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(aggregate)
    }

    async fn refresh_aggregate(
        &self,
        kind: ResourceKind,
        target_id: i64,
    ) -> DomainResult<ReviewAggregate> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        lock_target(&mut tx, kind, target_id).await?;
        let aggregate = rewrite_aggregate(&mut tx, kind, target_id).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(aggregate)
    }
}

/// Serialises review writes per target: every writer takes the target row
/// lock before touching its reviews.
async fn lock_target(
    conn: &mut PgConnection,
    kind: ResourceKind,
    target_id: i64,
) -> DomainResult<()> {
    let (table, _) = table_of(kind);
    sqlx::query_scalar::<_, i64>(&format!("SELECT id FROM {table} WHERE id = $1 FOR UPDATE"))
        .bind(target_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?
        .map(|_| ())
        .ok_or_else(|| {
            DomainError::NotFound(format!("{} {target_id} not found", kind.profile().label))
        })
}

/// Rebuilds `rating` and `review_count` of the target from the rows visible
/// to this transaction.
async fn rewrite_aggregate(
    conn: &mut PgConnection,
    kind: ResourceKind,
    target_id: i64,
) -> DomainResult<ReviewAggregate> {
    let ratings = sqlx::query_scalar::<_, i16>(
        "SELECT rating FROM reviews WHERE target_kind = $1 AND target_id = $2",
    )
    .bind(kind.as_str())
    .bind(target_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx)?
    .into_iter()
    .map(|rating| Rating::new(i32::from(rating)))
    .collect::<DomainResult<Vec<_>>>()?;
    let aggregate = ReviewAggregate::from_ratings(ratings);

    let (table, _) = table_of(kind);
    sqlx::query(&format!(
        "UPDATE {table} SET rating = $2, review_count = $3 WHERE id = $1"
    ))
    .bind(target_id)
    .bind(aggregate.rating)
    .bind(i32::try_from(aggregate.review_count).unwrap_or(i32::MAX))
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Ok(aggregate)
}
