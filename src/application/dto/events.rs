// src/application/dto/events.rs
use crate::domain::event::{Event, EventStatus, Registration, RegistrationStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: i64,
    pub organizer_id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    #[serde(with = "serde_time")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_cents: i64,
    pub capacity: Option<i32>,
    pub current_attendees: i32,
    pub status: EventStatus,
    pub featured: bool,
    pub rating: Option<f64>,
    pub review_count: u32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.into(),
            organizer_id: event.organizer_id.into(),
            title: event.title,
            slug: event.slug.into(),
            description: event.description,
            category: event.category,
            start_date: event.start_date,
            end_date: event.end_date,
            location: event.location,
            address: event.address,
            latitude: event.coordinates.map(|c| c.latitude),
            longitude: event.coordinates.map(|c| c.longitude),
            price_cents: event.price_cents,
            capacity: event.capacity,
            current_attendees: event.current_attendees,
            status: event.status,
            featured: event.featured,
            rating: event.reviews.rating,
            review_count: event.reviews.review_count,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDto {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: RegistrationStatus,
    pub current_attendees: i32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl RegistrationDto {
    pub fn new(registration: Registration, current_attendees: i32) -> Self {
        Self {
            id: registration.id.into(),
            event_id: registration.event_id.into(),
            user_id: registration.user_id.into(),
            status: registration.status,
            current_attendees,
            created_at: registration.created_at,
            updated_at: registration.updated_at,
        }
    }
}

/// Published events of one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDayDto {
    pub date: NaiveDate,
    pub events: Vec<EventDto>,
}
