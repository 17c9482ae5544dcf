// src/domain/package/repository.rs
use crate::domain::cursor::ListCursor;
use crate::domain::errors::DomainResult;
use crate::domain::ids::PackageId;
use crate::domain::package::entity::{NewPackage, Package, PackageUpdate};
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    pub category: Option<String>,
    pub region: Option<String>,
    pub search: Option<String>,
    pub featured_only: bool,
    /// Lists this owner's packages in every status instead of active ones only.
    pub owner: Option<UserId>,
}

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn insert(&self, package: NewPackage) -> DomainResult<Package>;
    async fn update(&self, update: PackageUpdate) -> DomainResult<Package>;
    async fn delete(&self, id: PackageId) -> DomainResult<()>;
    async fn find_by_id(&self, id: PackageId) -> DomainResult<Option<Package>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Package>>;
    async fn list_page(
        &self,
        filter: PackageFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Package>, Option<ListCursor>)>;
    /// Distinct categories of active packages, sorted.
    async fn categories(&self) -> DomainResult<Vec<String>>;
    /// Distinct regions of active packages, sorted.
    async fn regions(&self) -> DomainResult<Vec<String>>;
}
