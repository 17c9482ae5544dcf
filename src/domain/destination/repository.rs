// src/domain/destination/repository.rs
use crate::domain::cursor::ListCursor;
use crate::domain::destination::entity::{Destination, DestinationUpdate, NewDestination};
use crate::domain::errors::DomainResult;
use crate::domain::ids::DestinationId;
use crate::domain::slug::Slug;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct DestinationFilter {
    pub category: Option<String>,
    pub region: Option<String>,
    pub search: Option<String>,
    pub featured_only: bool,
}

#[async_trait]
pub trait DestinationRepository: Send + Sync {
    async fn insert(&self, destination: NewDestination) -> DomainResult<Destination>;
    async fn update(&self, update: DestinationUpdate) -> DomainResult<Destination>;
    async fn delete(&self, id: DestinationId) -> DomainResult<()>;
    async fn find_by_id(&self, id: DestinationId) -> DomainResult<Option<Destination>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Destination>>;
    /// Published destinations only, newest first.
    async fn list_page(
        &self,
        filter: DestinationFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Destination>, Option<ListCursor>)>;
}
