// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_blog;
mod postgres_booking;
mod postgres_business;
mod postgres_departure;
mod postgres_destination;
mod postgres_event;
mod postgres_lookup;
mod postgres_package;
mod postgres_review;
mod postgres_saved;
mod postgres_user;
mod support;

pub use error::map_sqlx;
pub use postgres_blog::PostgresBlogPostRepository;
pub use postgres_booking::PostgresBookingRepository;
pub use postgres_business::PostgresBusinessRepository;
pub use postgres_departure::PostgresDepartureRepository;
pub use postgres_destination::PostgresDestinationRepository;
pub use postgres_event::{PostgresEventRepository, PostgresRegistrationRepository};
pub use postgres_lookup::{PostgresRecordLookup, PostgresSlugRepository};
pub use postgres_package::PostgresPackageRepository;
pub use postgres_review::PostgresReviewRepository;
pub use postgres_saved::PostgresSavedItemRepository;
pub use postgres_user::PostgresUserRepository;

use crate::domain::errors::{DomainError, DomainResult};
use sqlx::PgPool;

/// Deletes a reviewable record together with the reviews and bookmarks pointing at it.
pub(crate) async fn delete_with_dependents(
    pool: &PgPool,
    table: &'static str,
    kind: &'static str,
    id: i64,
) -> DomainResult<()> {
    let mut tx = pool.begin().await.map_err(map_sqlx)?;

    let removed = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .rows_affected();
    if removed == 0 {
        return Err(DomainError::NotFound(format!("{kind} {id} not found")));
    }

    for dependent in ["reviews", "saved_items"] {
        sqlx::query(&format!(
            "DELETE FROM {dependent} WHERE target_kind = $1 AND target_id = $2"
        ))
        .bind(kind)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
    }

    tx.commit().await.map_err(map_sqlx)?;
    Ok(())
}
