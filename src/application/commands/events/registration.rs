// src/application/commands/events/registration.rs
use super::EventCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, RegistrationDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::ids::EventId,
};
use tracing::info;

impl EventCommandService {
    /// Confirms a seat for the actor. Capacity is enforced by the repository
    /// while the event row is locked.
    pub async fn register(
        &self,
        actor: &AuthenticatedUser,
        event_id: i64,
    ) -> ApplicationResult<RegistrationDto> {
        let event = self.load(event_id).await?;
        event.ensure_accepts_registrations()?;
        if let Some(existing) = self.registrations.find(event.id, actor.id).await? {
            existing.ensure_not_confirmed()?;
        }

        let (registration, attendees) = self
            .registrations
            .admit(event.id, actor.id, self.clock.now())
            .await?;
        info!(event_id = %event.id, user_id = %actor.id, attendees, "registered for event");

        Ok(RegistrationDto::new(registration, attendees))
    }

    pub async fn cancel_registration(
        &self,
        actor: &AuthenticatedUser,
        event_id: i64,
    ) -> ApplicationResult<RegistrationDto> {
        let event_id = EventId::new(event_id)?;
        let existing = self
            .registrations
            .find(event_id, actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("no registration for this event"))?;
        existing.ensure_cancellable()?;

        let (registration, attendees) = self
            .registrations
            .cancel(event_id, actor.id, self.clock.now())
            .await?;
        info!(event_id = %event_id, user_id = %actor.id, attendees, "cancelled registration");

        Ok(RegistrationDto::new(registration, attendees))
    }
}
