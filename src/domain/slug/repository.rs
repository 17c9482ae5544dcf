// src/domain/slug/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::resource::ResourceKind;
use crate::domain::slug::Slug;
use async_trait::async_trait;

#[async_trait]
pub trait SlugRepository: Send + Sync {
    /// Whether another record of `kind` already uses `slug`, ignoring `exclude_id`.
    async fn slug_exists(
        &self,
        kind: ResourceKind,
        slug: &Slug,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool>;
}
