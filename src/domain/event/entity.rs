// src/domain/event/entity.rs
use crate::domain::derived::ReviewAggregate;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::EventId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use crate::domain::validation::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// `draft -> published -> cancelled`; cancelled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn next(self) -> DomainResult<Self> {
        match self {
            EventStatus::Draft => Ok(EventStatus::Published),
            EventStatus::Published => Ok(EventStatus::Cancelled),
            EventStatus::Cancelled => Err(DomainError::Conflict(
                "cancelled events cannot change status".into(),
            )),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            other => Err(DomainError::invalid(
                "status",
                format!("unknown event status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub organizer_id: UserId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub price_cents: i64,
    pub capacity: Option<i32>,
    pub current_attendees: i32,
    pub status: EventStatus,
    pub featured: bool,
    pub reviews: ReviewAggregate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.current_attendees >= capacity)
    }

    /// Checked against the locked row before a registration is confirmed.
    pub fn ensure_accepts_registrations(&self) -> DomainResult<()> {
        if self.status != EventStatus::Published {
            return Err(DomainError::Validation(
                "registration is only open for published events".into(),
            ));
        }
        if self.is_full() {
            return Err(DomainError::Conflict("event is full".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub organizer_id: UserId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub price_cents: i64,
    pub capacity: Option<i32>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EventUpdate {
    pub id: EventId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Option<Coordinates>>,
    pub price_cents: Option<i64>,
    pub capacity: Option<Option<i32>>,
    pub status: Option<EventStatus>,
    pub featured: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl EventUpdate {
    pub fn new(id: EventId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            description: None,
            category: None,
            start_date: None,
            end_date: None,
            location: None,
            address: None,
            coordinates: None,
            price_cents: None,
            capacity: None,
            status: None,
            featured: None,
            updated_at,
        }
    }
}
