// src/infrastructure/repositories/support.rs
//! Query-building pieces shared by the Postgres repositories.
use crate::domain::cursor::ListCursor;
use crate::domain::derived::ReviewAggregate;
use crate::domain::errors::DomainResult;
use crate::domain::validation::Coordinates;
use sqlx::{Postgres, QueryBuilder};

pub(super) const MAX_PAGE: u32 = 100;

/// Sort column and direction a keyset listing pages over; `id` breaks ties
/// in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Keyset {
    column: &'static str,
    ascending: bool,
}

impl Keyset {
    pub(super) const NEWEST: Self = Self {
        column: "created_at",
        ascending: false,
    };

    pub(super) const fn ascending(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    fn comparison(self) -> &'static str {
        if self.ascending { ">" } else { "<" }
    }

    fn direction(self) -> &'static str {
        if self.ascending { "ASC" } else { "DESC" }
    }
}

/// Emits ` WHERE ` before the first condition and ` AND ` before the rest.
#[derive(Default)]
pub(super) struct Conditions {
    started: bool,
}

impl Conditions {
    pub(super) fn next<'b, 'a>(
        &mut self,
        builder: &'b mut QueryBuilder<'a, Postgres>,
    ) -> &'b mut QueryBuilder<'a, Postgres> {
        builder.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
        builder
    }

    pub(super) fn cursor<'a>(
        &mut self,
        builder: &mut QueryBuilder<'a, Postgres>,
        cursor: Option<ListCursor>,
    ) {
        self.cursor_on(builder, Keyset::NEWEST, cursor);
    }

    /// Rows strictly after `cursor` in `keyset` order.
    pub(super) fn cursor_on<'a>(
        &mut self,
        builder: &mut QueryBuilder<'a, Postgres>,
        keyset: Keyset,
        cursor: Option<ListCursor>,
    ) {
        if let Some(cursor) = cursor {
            self.next(builder).push(format!(
                "({}, id) {} (",
                keyset.column,
                keyset.comparison()
            ));
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
    }

    /// `(col ILIKE pattern OR ...)` over the given columns. The query is
    /// matched literally.
    pub(super) fn search<'a>(
        &mut self,
        builder: &mut QueryBuilder<'a, Postgres>,
        columns: &[&str],
        search: Option<String>,
    ) {
        let Some(query) = search else { return };
        let pattern = format!("%{}%", escape_like(query.trim()));
        self.next(builder).push("(");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push(*column).push(" ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(r" ESCAPE '\'");
        }
        builder.push(")");
    }
}

/// Backslash-escapes the LIKE wildcards `%` and `_` and the escape
/// character itself.
pub(super) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Appends newest-first ordering and the look-ahead limit.
pub(super) fn order_and_limit(builder: &mut QueryBuilder<'_, Postgres>, limit: u32) {
    order_on_and_limit(builder, Keyset::NEWEST, limit);
}

pub(super) fn order_on_and_limit(
    builder: &mut QueryBuilder<'_, Postgres>,
    keyset: Keyset,
    limit: u32,
) {
    let direction = keyset.direction();
    builder.push(format!(
        " ORDER BY {} {direction}, id {direction} LIMIT ",
        keyset.column
    ));
    builder.push_bind(i64::from(limit.clamp(1, MAX_PAGE)) + 1);
}

/// Drops the look-ahead row and derives the follow-up cursor from the last kept row.
pub(super) fn split_page<T>(
    mut items: Vec<T>,
    limit: u32,
    key: impl Fn(&T) -> ListCursor,
) -> (Vec<T>, Option<ListCursor>) {
    let limit = limit.clamp(1, MAX_PAGE) as usize;
    if items.len() > limit {
        items.truncate(limit);
        let next = items.last().map(key);
        (items, next)
    } else {
        (items, None)
    }
}

pub(super) fn coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> DomainResult<Option<Coordinates>> {
    Coordinates::from_parts(latitude, longitude)
}

pub(super) fn aggregate(rating: Option<f64>, review_count: i32) -> ReviewAggregate {
    ReviewAggregate {
        rating,
        review_count: u32::try_from(review_count).unwrap_or(0),
    }
}
