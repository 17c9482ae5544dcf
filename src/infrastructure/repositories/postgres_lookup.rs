// src/infrastructure/repositories/postgres_lookup.rs
use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::resource::{RecordLookup, ResourceKind};
use crate::domain::slug::{Slug, SlugRepository};
use crate::domain::user::UserId;
use async_trait::async_trait;
use sqlx::PgPool;

/// Table and owner column backing each record kind.
pub(super) const fn table_of(kind: ResourceKind) -> (&'static str, &'static str) {
    match kind {
        ResourceKind::BlogPost => ("blog_posts", "author_id"),
        ResourceKind::Package => ("packages", "owner_id"),
        ResourceKind::Event => ("events", "organizer_id"),
        ResourceKind::Destination => ("destinations", "owner_id"),
        ResourceKind::Business => ("businesses", "owner_id"),
        ResourceKind::Booking => ("bookings", "user_id"),
    }
}

#[derive(Clone)]
pub struct PostgresSlugRepository {
    pool: PgPool,
}

impl PostgresSlugRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlugRepository for PostgresSlugRepository {
    async fn slug_exists(
        &self,
        kind: ResourceKind,
        slug: &Slug,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let (table, _) = table_of(kind);
        sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {table} \
             WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))"
        ))
        .bind(slug.as_str())
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

#[derive(Clone)]
pub struct PostgresRecordLookup {
    pool: PgPool,
}

impl PostgresRecordLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordLookup for PostgresRecordLookup {
    async fn owner_of(&self, kind: ResourceKind, id: i64) -> DomainResult<Option<UserId>> {
        let (table, owner_column) = table_of(kind);
        let owner = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT {owner_column} FROM {table} WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        owner.map(UserId::new).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_its_own_table() {
        let mut tables: Vec<_> = ResourceKind::ALL.iter().map(|k| table_of(*k).0).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), ResourceKind::ALL.len());
        assert_eq!(table_of(ResourceKind::Event).1, "organizer_id");
    }
}
