// src/application/commands/events/update.rs
use super::{
    EventCommandService,
    service::{MAX_LABEL_LEN, MAX_TITLE_LEN},
};
use crate::{
    application::{
        commands::capability::ensure_owner_or_any,
        dto::{AuthenticatedUser, EventDto},
        error::ApplicationResult,
    },
    domain::{
        event::EventUpdate,
        resource::ResourceKind,
        validation::{
            Coordinates, ensure_date_order, ensure_non_negative, ensure_optional,
            ensure_positive, required_text,
        },
    },
};
use chrono::{DateTime, Utc};
use tracing::info;

/// Partial update. Status moves only through `toggle_status`.
#[derive(Debug, Default)]
pub struct UpdateEventCommand {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_cents: Option<i64>,
    pub capacity: Option<i32>,
}

impl EventCommandService {
    pub async fn update_event(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateEventCommand,
    ) -> ApplicationResult<EventDto> {
        let event = self.load(command.id).await?;
        ensure_owner_or_any(actor, ResourceKind::Event, "update", event.organizer_id)?;

        ensure_date_order(
            command.start_date.unwrap_or(event.start_date),
            command.end_date.unwrap_or(event.end_date),
        )?;

        let text = |field, value: Option<String>, max| {
            ensure_optional(value, |v| required_text(field, v, max))
        };

        let update = EventUpdate {
            title: text("title", command.title, MAX_TITLE_LEN)?,
            description: text("description", command.description, usize::MAX)?,
            category: text("category", command.category, MAX_LABEL_LEN)?,
            start_date: command.start_date,
            end_date: command.end_date,
            location: text("location", command.location, MAX_LABEL_LEN)?,
            address: command.address.map(|a| a.trim().to_string()),
            coordinates: Coordinates::from_parts(command.latitude, command.longitude)?.map(Some),
            price_cents: ensure_optional(command.price_cents, |v| {
                ensure_non_negative("price_cents", v)
            })?,
            capacity: ensure_optional(command.capacity, |v| ensure_positive("capacity", v))?
                .map(Some),
            ..EventUpdate::new(event.id, self.clock.now())
        };

        Ok(self.events.update(update).await?.into())
    }

    pub async fn delete_event(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let event = self.load(id).await?;
        ensure_owner_or_any(actor, ResourceKind::Event, "delete", event.organizer_id)?;
        self.events.delete(event.id).await?;
        info!(event_id = %event.id, "deleted event");
        Ok(())
    }
}
