// src/application/queries/events/get.rs
use super::{EventQueryService, service::is_visible};
use crate::{
    application::{
        commands::capability::ensure_owner_or_capability,
        dto::{AuthenticatedUser, EventDto, RegistrationDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{ids::EventId, resource::ResourceKind, slug::Slug},
};

impl EventQueryService {
    pub async fn get_event_by_id(
        &self,
        viewer: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<EventDto> {
        let id = EventId::new(id)?;
        match self.events.find_by_id(id).await? {
            Some(event) if is_visible(&event, viewer) => Ok(event.into()),
            _ => Err(ApplicationError::missing("event", id)),
        }
    }

    pub async fn get_event_by_slug(
        &self,
        viewer: Option<&AuthenticatedUser>,
        slug: &str,
    ) -> ApplicationResult<EventDto> {
        let found = match Slug::new(slug) {
            Ok(slug) => self.events.find_by_slug(&slug).await?,
            Err(_) => None,
        };
        match found {
            Some(event) if is_visible(&event, viewer) => Ok(event.into()),
            _ => Err(ApplicationError::not_found(format!("event '{slug}' not found"))),
        }
    }

    /// Confirmed registrations; organizer or `events:read:registrations`.
    pub async fn list_registrations(
        &self,
        actor: &AuthenticatedUser,
        event_id: i64,
    ) -> ApplicationResult<Vec<RegistrationDto>> {
        let id = EventId::new(event_id)?;
        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("event", id))?;
        ensure_owner_or_capability(
            actor,
            ResourceKind::Event,
            "read:registrations",
            event.organizer_id,
        )?;

        let registrations = self.registrations.list_confirmed(id).await?;
        Ok(registrations
            .into_iter()
            .map(|registration| RegistrationDto::new(registration, event.current_attendees))
            .collect())
    }
}
