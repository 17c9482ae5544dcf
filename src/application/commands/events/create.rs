// src/application/commands/events/create.rs
use super::{
    EventCommandService,
    service::{MAX_LABEL_LEN, MAX_TITLE_LEN},
};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, EventDto},
        error::ApplicationResult,
    },
    domain::{
        errors::DomainError,
        event::{EventStatus, NewEvent},
        resource::ResourceKind,
        validation::{
            Coordinates, ensure_date_order, ensure_non_negative, ensure_optional,
            ensure_positive, required_text,
        },
    },
};
use chrono::{DateTime, Utc};
use tracing::info;

pub struct CreateEventCommand {
    pub title: String,
    pub description: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_cents: Option<i64>,
    pub capacity: Option<i32>,
    pub status: Option<EventStatus>,
}

impl EventCommandService {
    pub async fn create_event(
        &self,
        actor: &AuthenticatedUser,
        command: CreateEventCommand,
    ) -> ApplicationResult<EventDto> {
        ensure_capability(actor, "events", "create")?;

        let title = required_text("title", command.title, MAX_TITLE_LEN)?;
        ensure_date_order(command.start_date, command.end_date)?;
        let coordinates = Coordinates::from_parts(command.latitude, command.longitude)?;
        let status = command.status.unwrap_or_default();
        if status == EventStatus::Cancelled {
            return Err(DomainError::invalid("status", "new events cannot start cancelled").into());
        }

        let new_event = NewEvent {
            organizer_id: actor.id,
            slug: self.slugs.assign(ResourceKind::Event, &title, None).await?,
            title,
            description: required_text("description", command.description, usize::MAX)?,
            category: required_text("category", command.category, MAX_LABEL_LEN)?,
            start_date: command.start_date,
            end_date: command.end_date,
            location: required_text("location", command.location, MAX_LABEL_LEN)?,
            address: command.address.map(|a| a.trim().to_string()).unwrap_or_default(),
            coordinates,
            price_cents: ensure_non_negative("price_cents", command.price_cents.unwrap_or(0))?,
            capacity: ensure_optional(command.capacity, |v| ensure_positive("capacity", v))?,
            status,
            created_at: self.clock.now(),
        };

        let event = match self.events.insert(new_event.clone()).await {
            Err(DomainError::DuplicateSlug) => {
                info!(slug = %new_event.slug, "event slug taken at insert, retrying once");
                let slug = self
                    .slugs
                    .assign_disambiguated(ResourceKind::Event, &new_event.title, None)
                    .await?;
                self.events.insert(NewEvent { slug, ..new_event }).await?
            }
            other => other?,
        };
        info!(event_id = %event.id, slug = %event.slug, "created event");

        Ok(event.into())
    }
}
