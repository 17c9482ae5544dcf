// src/application/dto/saved.rs
use crate::domain::resource::ResourceKind;
use crate::domain::saved::SavedItem;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItemDto {
    pub id: i64,
    pub target_kind: ResourceKind,
    pub target_id: i64,
    #[serde(with = "serde_time")]
    pub saved_at: DateTime<Utc>,
}

impl From<SavedItem> for SavedItemDto {
    fn from(item: SavedItem) -> Self {
        Self {
            id: item.id.into(),
            target_kind: item.target_kind,
            target_id: item.target_id,
            saved_at: item.saved_at,
        }
    }
}
