// src/application/queries/events/list.rs
use super::EventQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, CursorPage, EventDto},
        error::ApplicationResult,
        queries::listing::{PageRequest, non_blank},
    },
    domain::event::{EventFilter, EventOrder},
};

#[derive(Debug, Clone, Default)]
pub struct ListEventsQuery {
    pub page: PageRequest,
    pub q: Option<String>,
    pub category: Option<String>,
    pub featured_only: bool,
}

impl EventQueryService {
    pub async fn list_events(
        &self,
        query: ListEventsQuery,
    ) -> ApplicationResult<CursorPage<EventDto>> {
        let filter = EventFilter {
            category: non_blank(query.category),
            search: non_blank(query.q),
            featured_only: query.featured_only,
            ..Default::default()
        };
        self.page(filter, &query.page).await
    }

    /// Published events that have not started yet, soonest first. The
    /// cursor pages on `start_date`.
    pub async fn upcoming_events(
        &self,
        page: PageRequest,
    ) -> ApplicationResult<CursorPage<EventDto>> {
        let filter = EventFilter {
            starting_after: Some(self.clock.now()),
            order: EventOrder::SoonestFirst,
            ..Default::default()
        };
        self.page(filter, &page).await
    }

    /// Featured published events, newest first.
    pub async fn featured_events(
        &self,
        page: PageRequest,
    ) -> ApplicationResult<CursorPage<EventDto>> {
        let filter = EventFilter {
            featured_only: true,
            ..Default::default()
        };
        self.page(filter, &page).await
    }

    /// Distinct categories of published events.
    pub async fn categories(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.events.categories().await?)
    }

    /// Every event the actor organizes, whatever its status.
    pub async fn my_events(
        &self,
        actor: &AuthenticatedUser,
        page: PageRequest,
    ) -> ApplicationResult<CursorPage<EventDto>> {
        let filter = EventFilter {
            organizer: Some(actor.id),
            ..Default::default()
        };
        self.page(filter, &page).await
    }

    async fn page(
        &self,
        filter: EventFilter,
        page: &PageRequest,
    ) -> ApplicationResult<CursorPage<EventDto>> {
        let (limit, cursor) = page.resolve()?;
        let (events, next) = self.events.list_page(filter, limit, cursor).await?;
        Ok(CursorPage::from_page(events, next))
    }
}
