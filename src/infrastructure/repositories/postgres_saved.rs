// src/infrastructure/repositories/postgres_saved.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::SavedItemId;
use crate::domain::resource::ResourceKind;
use crate::domain::saved::{SavedItem, SavedItemRepository};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const SAVED_COLUMNS: &str = "id, user_id, target_kind, target_id, saved_at";

#[derive(Clone)]
pub struct PostgresSavedItemRepository {
    pool: PgPool,
}

impl PostgresSavedItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SavedRow {
    id: i64,
    user_id: i64,
    target_kind: String,
    target_id: i64,
    saved_at: DateTime<Utc>,
}

impl TryFrom<SavedRow> for SavedItem {
    type Error = DomainError;

    fn try_from(row: SavedRow) -> Result<Self, Self::Error> {
        Ok(SavedItem {
            id: SavedItemId::new(row.id)?,
            user_id: UserId::new(row.user_id)?,
            target_kind: row.target_kind.parse()?,
            target_id: row.target_id,
            saved_at: row.saved_at,
        })
    }
}

#[async_trait]
impl SavedItemRepository for PostgresSavedItemRepository {
    async fn insert(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        target_id: i64,
        at: DateTime<Utc>,
    ) -> DomainResult<SavedItem> {
        let row = sqlx::query_as::<_, SavedRow>(&format!(
            "INSERT INTO saved_items (user_id, target_kind, target_id, saved_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {SAVED_COLUMNS}"
        ))
        .bind(i64::from(user_id))
        .bind(kind.as_str())
        .bind(target_id)
        .bind(at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        SavedItem::try_from(row)
    }

    async fn delete(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        target_id: i64,
    ) -> DomainResult<bool> {
        let result = sqlx::query(
            "DELETE FROM saved_items WHERE user_id = $1 AND target_kind = $2 AND target_id = $3",
        )
        .bind(i64::from(user_id))
        .bind(kind.as_str())
        .bind(target_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        kind: ResourceKind,
    ) -> DomainResult<Vec<SavedItem>> {
        sqlx::query_as::<_, SavedRow>(&format!(
            "SELECT {SAVED_COLUMNS} FROM saved_items
             WHERE user_id = $1 AND target_kind = $2
             ORDER BY saved_at DESC, id DESC"
        ))
        .bind(i64::from(user_id))
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(SavedItem::try_from)
        .collect()
    }
}
