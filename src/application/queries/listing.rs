// src/application/queries/listing.rs
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::cursor::ListCursor,
};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Common listing parameters accepted by every collection endpoint.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub limit: u32,
    pub cursor: Option<String>,
}

pub(crate) fn normalize_limit(limit: u32) -> u32 {
    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}

pub(crate) fn decode_cursor(token: Option<&str>) -> ApplicationResult<Option<ListCursor>> {
    match token {
        Some(value) if !value.is_empty() => ListCursor::decode(value)
            .map(Some)
            .map_err(ApplicationError::from),
        _ => Ok(None),
    }
}

/// Trimmed filter value, `None` when blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PageRequest {
    pub(crate) fn resolve(&self) -> ApplicationResult<(u32, Option<ListCursor>)> {
        Ok((normalize_limit(self.limit), decode_cursor(self.cursor.as_deref())?))
    }
}
