// src/domain/saved/mod.rs
use crate::domain::errors::DomainResult;
use crate::domain::ids::SavedItemId;
use crate::domain::resource::ResourceKind;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A record bookmarked by a user.
#[derive(Debug, Clone)]
pub struct SavedItem {
    pub id: SavedItemId,
    pub user_id: UserId,
    pub target_kind: ResourceKind,
    pub target_id: i64,
    pub saved_at: DateTime<Utc>,
}

#[async_trait]
pub trait SavedItemRepository: Send + Sync {
    /// `Conflict` when already saved.
    async fn insert(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        target_id: i64,
        at: DateTime<Utc>,
    ) -> DomainResult<SavedItem>;
    /// Returns whether a row was removed.
    async fn delete(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        target_id: i64,
    ) -> DomainResult<bool>;
    async fn list_for_user(
        &self,
        user_id: UserId,
        kind: ResourceKind,
    ) -> DomainResult<Vec<SavedItem>>;
}
