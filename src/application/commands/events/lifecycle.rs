// src/application/commands/events/lifecycle.rs
use super::EventCommandService;
use crate::{
    application::{
        commands::capability::{ensure_can_feature, ensure_owner_or_any},
        dto::{AuthenticatedUser, EventDto},
        error::ApplicationResult,
    },
    domain::{event::EventUpdate, resource::ResourceKind},
};
use tracing::info;

impl EventCommandService {
    /// Advances `draft -> published -> cancelled`.
    pub async fn toggle_status(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<EventDto> {
        let event = self.load(id).await?;
        ensure_owner_or_any(actor, ResourceKind::Event, "update", event.organizer_id)?;

        let next = event.status.next()?;
        let update = EventUpdate {
            status: Some(next),
            ..EventUpdate::new(event.id, self.clock.now())
        };
        let updated = self.events.update(update).await?;
        info!(event_id = %updated.id, from = %event.status, to = %next, "event status changed");
        Ok(updated.into())
    }

    pub async fn toggle_featured(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<EventDto> {
        let event = self.load(id).await?;
        ensure_can_feature(actor, ResourceKind::Event, event.organizer_id)?;

        let update = EventUpdate {
            featured: Some(!event.featured),
            ..EventUpdate::new(event.id, self.clock.now())
        };
        Ok(self.events.update(update).await?.into())
    }
}
