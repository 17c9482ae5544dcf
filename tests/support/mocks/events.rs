// tests/support/mocks/events.rs
use super::catalog::Catalog;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use trailhead_core::domain::cursor::ListCursor;
use trailhead_core::domain::derived::ReviewAggregate;
use trailhead_core::domain::errors::{DomainError, DomainResult};
use trailhead_core::domain::event::registration::confirmed_attendees;
use trailhead_core::domain::event::{
    Event, EventFilter, EventOrder, EventRepository, EventStatus, EventUpdate, NewEvent,
    Registration, RegistrationRepository, RegistrationStatus,
};
use trailhead_core::domain::ids::{EventId, RegistrationId};
use trailhead_core::domain::resource::ResourceKind;
use trailhead_core::domain::slug::Slug;
use trailhead_core::domain::user::UserId;

/// Event rows shared with the registration store; holding the lock plays
/// the part of `SELECT ... FOR UPDATE`.
pub type EventTable = Arc<Mutex<BTreeMap<i64, Event>>>;

fn sort_key(event: &Event, order: EventOrder) -> DateTime<Utc> {
    match order {
        EventOrder::Newest => event.created_at,
        EventOrder::SoonestFirst => event.start_date,
    }
}

pub struct InMemoryEvents {
    catalog: Arc<Catalog>,
    events: EventTable,
}

impl InMemoryEvents {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            events: Arc::default(),
        }
    }

    pub fn table(&self) -> EventTable {
        Arc::clone(&self.events)
    }

    pub fn get(&self, id: i64) -> Option<Event> {
        self.events.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl EventRepository for InMemoryEvents {
    async fn insert(&self, event: NewEvent) -> DomainResult<Event> {
        let id = self.catalog.next_id();
        self.catalog.claim_slug(ResourceKind::Event, &event.slug, id)?;
        self.catalog.register(ResourceKind::Event, id, event.organizer_id);

        let stored = Event {
            id: EventId(id),
            organizer_id: event.organizer_id,
            title: event.title,
            slug: event.slug,
            description: event.description,
            category: event.category,
            start_date: event.start_date,
            end_date: event.end_date,
            location: event.location,
            address: event.address,
            coordinates: event.coordinates,
            price_cents: event.price_cents,
            capacity: event.capacity,
            current_attendees: 0,
            status: event.status,
            featured: false,
            reviews: ReviewAggregate::empty(),
            created_at: event.created_at,
            updated_at: event.created_at,
        };
        self.events.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: EventUpdate) -> DomainResult<Event> {
        let id = i64::from(update.id);
        let mut events = self.events.lock().unwrap();
        let event = events
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("event {id} not found")))?;

        if let Some(title) = update.title {
            event.title = title;
        }
        if let Some(description) = update.description {
            event.description = description;
        }
        if let Some(category) = update.category {
            event.category = category;
        }
        if let Some(start_date) = update.start_date {
            event.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            event.end_date = end_date;
        }
        if let Some(location) = update.location {
            event.location = location;
        }
        if let Some(address) = update.address {
            event.address = address;
        }
        if let Some(coordinates) = update.coordinates {
            event.coordinates = coordinates;
        }
        if let Some(price_cents) = update.price_cents {
            event.price_cents = price_cents;
        }
        if let Some(capacity) = update.capacity {
            event.capacity = capacity;
        }
        if let Some(status) = update.status {
            event.status = status;
        }
        if let Some(featured) = update.featured {
            event.featured = featured;
        }
        event.updated_at = update.updated_at;
        Ok(event.clone())
    }

    async fn delete(&self, id: EventId) -> DomainResult<()> {
        let id = i64::from(id);
        self.events
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound(format!("event {id} not found")))?;
        self.catalog.forget(ResourceKind::Event, id);
        Ok(())
    }

    async fn find_by_id(&self, id: EventId) -> DomainResult<Option<Event>> {
        Ok(self.get(id.into()))
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Event>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .values()
            .find(|event| event.slug == *slug)
            .cloned())
    }

    async fn list_page(
        &self,
        filter: EventFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Event>, Option<ListCursor>)> {
        let events = self.events.lock().unwrap();
        let mut matching: Vec<Event> = events
            .values()
            .filter(|event| match filter.organizer {
                Some(organizer) => event.organizer_id == organizer,
                None => event.status == EventStatus::Published,
            })
            .filter(|event| !filter.featured_only || event.featured)
            .filter(|event| filter.starting_after.is_none_or(|after| event.start_date > after))
            .filter(|event| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| event.category.eq_ignore_ascii_case(c))
            })
            .filter(|event| {
                cursor.as_ref().is_none_or(|c| {
                    let key = (sort_key(event, filter.order), i64::from(event.id));
                    match filter.order {
                        EventOrder::Newest => key < (c.created_at, c.id),
                        EventOrder::SoonestFirst => key > (c.created_at, c.id),
                    }
                })
            })
            .cloned()
            .collect();
        matching.sort_by_key(|event| (sort_key(event, filter.order), event.id));
        if filter.order == EventOrder::Newest {
            matching.reverse();
        }
        Ok(super::listings::split(matching, limit, |event| {
            ListCursor::new(sort_key(event, filter.order), event.id.into())
        }))
    }

    async fn categories(&self) -> DomainResult<Vec<String>> {
        let categories: BTreeSet<String> = self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.status == EventStatus::Published)
            .map(|e| e.category.clone())
            .collect();
        Ok(categories.into_iter().collect())
    }

    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Event>> {
        let mut matching: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.status == EventStatus::Published)
            .filter(|e| e.start_date >= from && e.start_date < to)
            .cloned()
            .collect();
        matching.sort_by_key(|e| (e.start_date, e.id));
        Ok(matching)
    }
}

pub struct InMemoryRegistrations {
    events: EventTable,
    registrations: Mutex<Vec<Registration>>,
    ids: std::sync::atomic::AtomicI64,
}

impl InMemoryRegistrations {
    pub fn new(events: EventTable) -> Self {
        Self {
            events,
            registrations: Mutex::new(Vec::new()),
            ids: Default::default(),
        }
    }

    fn recount(registrations: &[Registration], event: &mut Event) -> i32 {
        let attendees = confirmed_attendees(
            registrations
                .iter()
                .filter(|r| r.event_id == event.id),
        );
        event.current_attendees = attendees;
        attendees
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrations {
    async fn find(&self, event_id: EventId, user_id: UserId) -> DomainResult<Option<Registration>> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
            .cloned())
    }

    async fn list_confirmed(&self, event_id: EventId) -> DomainResult<Vec<Registration>> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.event_id == event_id && r.status == RegistrationStatus::Confirmed)
            .cloned()
            .collect())
    }

    async fn admit(
        &self,
        event_id: EventId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Registration, i32)> {
        let mut events = self.events.lock().unwrap();
        let event = events
            .get_mut(&i64::from(event_id))
            .ok_or_else(|| DomainError::NotFound(format!("event {event_id} not found")))?;
        event.ensure_accepts_registrations()?;

        let mut registrations = self.registrations.lock().unwrap();
        let registration = match registrations
            .iter_mut()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
        {
            Some(existing) => {
                existing.ensure_not_confirmed()?;
                existing.status = RegistrationStatus::Confirmed;
                existing.updated_at = at;
                existing.clone()
            }
            None => {
                let id = self.ids.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
                let created = Registration {
                    id: RegistrationId(id),
                    event_id,
                    user_id,
                    status: RegistrationStatus::Confirmed,
                    created_at: at,
                    updated_at: at,
                };
                registrations.push(created.clone());
                created
            }
        };
        let attendees = Self::recount(&registrations, event);
        Ok((registration, attendees))
    }

    async fn cancel(
        &self,
        event_id: EventId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Registration, i32)> {
        let mut events = self.events.lock().unwrap();
        let event = events
            .get_mut(&i64::from(event_id))
            .ok_or_else(|| DomainError::NotFound(format!("event {event_id} not found")))?;

        let mut registrations = self.registrations.lock().unwrap();
        let registration = registrations
            .iter_mut()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
            .ok_or_else(|| DomainError::NotFound("no registration for this event".into()))?;
        registration.ensure_cancellable()?;
        registration.status = RegistrationStatus::Cancelled;
        registration.updated_at = at;
        let cancelled = registration.clone();

        let attendees = Self::recount(&registrations, event);
        Ok((cancelled, attendees))
    }
}
