// src/application/queries/events/service.rs
use std::sync::Arc;

use crate::application::{dto::AuthenticatedUser, ports::time::Clock};
use crate::domain::event::{Event, EventRepository, EventStatus, RegistrationRepository};

pub struct EventQueryService {
    pub(super) events: Arc<dyn EventRepository>,
    pub(super) registrations: Arc<dyn RegistrationRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl EventQueryService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            registrations,
            clock,
        }
    }
}

/// Unpublished events are only shown to their organizer and to staff.
pub(super) fn is_visible(event: &Event, viewer: Option<&AuthenticatedUser>) -> bool {
    event.status == EventStatus::Published
        || viewer.is_some_and(|user| {
            user.id == event.organizer_id || user.has_capability("events", "update:any")
        })
}
