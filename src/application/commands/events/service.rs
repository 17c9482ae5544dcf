// src/application/commands/events/service.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::time::Clock,
};
use crate::domain::{
    event::{Event, EventRepository, RegistrationRepository},
    ids::EventId,
    slug::SlugAssigner,
};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_LABEL_LEN: usize = 200;

pub struct EventCommandService {
    pub(super) events: Arc<dyn EventRepository>,
    pub(super) registrations: Arc<dyn RegistrationRepository>,
    pub(super) slugs: Arc<SlugAssigner>,
    pub(super) clock: Arc<dyn Clock>,
}

impl EventCommandService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        slugs: Arc<SlugAssigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            registrations,
            slugs,
            clock,
        }
    }

    pub(super) async fn load(&self, id: i64) -> ApplicationResult<Event> {
        let id = EventId::new(id)?;
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("event", id))
    }
}
