// src/application/commands/saved.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, SavedItemDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        resource::{RecordLookup, ResourceKind},
        saved::SavedItemRepository,
    },
};

/// Bookmarks on any saveable record.
pub struct SavedItemService {
    saved: Arc<dyn SavedItemRepository>,
    records: Arc<dyn RecordLookup>,
    clock: Arc<dyn Clock>,
}

impl SavedItemService {
    pub fn new(
        saved: Arc<dyn SavedItemRepository>,
        records: Arc<dyn RecordLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            saved,
            records,
            clock,
        }
    }

    pub async fn save(
        &self,
        actor: &AuthenticatedUser,
        kind: ResourceKind,
        target_id: i64,
    ) -> ApplicationResult<SavedItemDto> {
        kind.ensure_saveable()?;
        if self.records.owner_of(kind, target_id).await?.is_none() {
            return Err(ApplicationError::missing(kind.profile().label, target_id));
        }
        let item = self
            .saved
            .insert(actor.id, kind, target_id, self.clock.now())
            .await?;
        Ok(item.into())
    }

    pub async fn unsave(
        &self,
        actor: &AuthenticatedUser,
        kind: ResourceKind,
        target_id: i64,
    ) -> ApplicationResult<()> {
        kind.ensure_saveable()?;
        if self.saved.delete(actor.id, kind, target_id).await? {
            Ok(())
        } else {
            Err(ApplicationError::not_found(format!(
                "{} {target_id} is not saved",
                kind.profile().label
            )))
        }
    }

    pub async fn list_saved(
        &self,
        actor: &AuthenticatedUser,
        kind: ResourceKind,
    ) -> ApplicationResult<Vec<SavedItemDto>> {
        kind.ensure_saveable()?;
        let items = self.saved.list_for_user(actor.id, kind).await?;
        Ok(items.into_iter().map(SavedItemDto::from).collect())
    }
}
