// src/application/dto/pagination.rs
use crate::domain::cursor::ListCursor;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = "T: Serialize"))]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        let has_more = next_cursor.is_some();
        Self {
            items,
            next_cursor,
            has_more,
        }
    }

    /// Maps repository rows into DTOs and encodes the follow-up cursor.
    pub fn from_page<R>(rows: Vec<R>, next: Option<ListCursor>) -> Self
    where
        R: Into<T>,
    {
        Self::new(
            rows.into_iter().map(Into::into).collect(),
            next.map(|cursor| cursor.encode()),
        )
    }
}
