// src/domain/business/repository.rs
use crate::domain::business::entity::{Business, BusinessUpdate, NewBusiness};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::DomainResult;
use crate::domain::ids::BusinessId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusinessOrder {
    #[default]
    Newest,
    /// Highest rated first; unrated businesses last. Not cursor paginated.
    Rating,
}

#[derive(Debug, Clone, Default)]
pub struct BusinessFilter {
    pub business_type: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub search: Option<String>,
    /// Every status of this owner's businesses instead of active ones only.
    pub owner: Option<UserId>,
    pub featured_only: bool,
    pub order: BusinessOrder,
}

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn insert(&self, business: NewBusiness) -> DomainResult<Business>;
    async fn update(&self, update: BusinessUpdate) -> DomainResult<Business>;
    async fn delete(&self, id: BusinessId) -> DomainResult<()>;
    async fn find_by_id(&self, id: BusinessId) -> DomainResult<Option<Business>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Business>>;
    async fn list_page(
        &self,
        filter: BusinessFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Business>, Option<ListCursor>)>;
}
