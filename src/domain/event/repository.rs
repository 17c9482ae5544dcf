// src/domain/event/repository.rs
use crate::domain::cursor::ListCursor;
use crate::domain::errors::DomainResult;
use crate::domain::event::entity::{Event, EventUpdate, NewEvent};
use crate::domain::event::registration::Registration;
use crate::domain::ids::EventId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Sort order of an event listing. The cursor timestamp is whichever
/// column the order sorts on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOrder {
    /// `created_at DESC, id DESC`.
    #[default]
    Newest,
    /// `start_date ASC, id ASC`.
    SoonestFirst,
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    /// Every status of this organizer's events instead of published ones only.
    pub organizer: Option<UserId>,
    pub starting_after: Option<DateTime<Utc>>,
    pub featured_only: bool,
    pub order: EventOrder,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert(&self, event: NewEvent) -> DomainResult<Event>;
    async fn update(&self, update: EventUpdate) -> DomainResult<Event>;
    async fn delete(&self, id: EventId) -> DomainResult<()>;
    async fn find_by_id(&self, id: EventId) -> DomainResult<Option<Event>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Event>>;
    async fn list_page(
        &self,
        filter: EventFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Event>, Option<ListCursor>)>;
    /// Distinct categories of published events, alphabetical.
    async fn categories(&self) -> DomainResult<Vec<String>>;
    /// Published events starting in `[from, to)`, earliest first.
    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Event>>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn find(&self, event_id: EventId, user_id: UserId) -> DomainResult<Option<Registration>>;

    async fn list_confirmed(&self, event_id: EventId) -> DomainResult<Vec<Registration>>;

    /// Locks the event, re-checks `Event::ensure_accepts_registrations`, confirms
    /// (or re-confirms) the registration and recounts attendees.
    /// Returns the registration and the new `current_attendees`.
    async fn admit(
        &self,
        event_id: EventId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Registration, i32)>;

    /// Marks the registration cancelled and recounts attendees.
    async fn cancel(
        &self,
        event_id: EventId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Registration, i32)>;
}
