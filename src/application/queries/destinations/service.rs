// src/application/queries/destinations/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, CursorPage, DestinationDto},
        error::{ApplicationError, ApplicationResult},
        queries::listing::{PageRequest, non_blank},
    },
    domain::{
        destination::{Destination, DestinationFilter, DestinationRepository, DestinationStatus},
        ids::DestinationId,
        slug::Slug,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ListDestinationsQuery {
    pub page: PageRequest,
    pub q: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub featured_only: bool,
}

pub struct DestinationQueryService {
    destinations: Arc<dyn DestinationRepository>,
}

impl DestinationQueryService {
    pub fn new(destinations: Arc<dyn DestinationRepository>) -> Self {
        Self { destinations }
    }

    pub async fn get_destination_by_id(
        &self,
        viewer: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<DestinationDto> {
        let id = DestinationId::new(id)?;
        match self.destinations.find_by_id(id).await? {
            Some(destination) if is_visible(&destination, viewer) => Ok(destination.into()),
            _ => Err(ApplicationError::missing("destination", id)),
        }
    }

    pub async fn get_destination_by_slug(
        &self,
        viewer: Option<&AuthenticatedUser>,
        slug: &str,
    ) -> ApplicationResult<DestinationDto> {
        let found = match Slug::new(slug) {
            Ok(slug) => self.destinations.find_by_slug(&slug).await?,
            Err(_) => None,
        };
        match found {
            Some(destination) if is_visible(&destination, viewer) => Ok(destination.into()),
            _ => Err(ApplicationError::not_found(format!("destination '{slug}' not found"))),
        }
    }

    /// Published destinations only.
    pub async fn list_destinations(
        &self,
        query: ListDestinationsQuery,
    ) -> ApplicationResult<CursorPage<DestinationDto>> {
        let (limit, cursor) = query.page.resolve()?;
        let filter = DestinationFilter {
            category: non_blank(query.category),
            region: non_blank(query.region),
            search: non_blank(query.q),
            featured_only: query.featured_only,
        };
        let (destinations, next) = self.destinations.list_page(filter, limit, cursor).await?;
        Ok(CursorPage::from_page(destinations, next))
    }
}

fn is_visible(destination: &Destination, viewer: Option<&AuthenticatedUser>) -> bool {
    destination.status == DestinationStatus::Published
        || viewer.is_some_and(|user| {
            user.id == destination.owner_id || user.has_capability("destinations", "update:any")
        })
}
