// src/domain/destination/entity.rs
use crate::domain::derived::ReviewAggregate;
use crate::domain::errors::DomainError;
use crate::domain::ids::DestinationId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use crate::domain::validation::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationStatus {
    Draft,
    #[default]
    Published,
}

impl DestinationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DestinationStatus::Draft => "draft",
            DestinationStatus::Published => "published",
        }
    }
}

impl fmt::Display for DestinationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DestinationStatus::Draft),
            "published" => Ok(DestinationStatus::Published),
            other => Err(DomainError::invalid(
                "status",
                format!("unknown destination status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Destination {
    pub id: DestinationId,
    pub owner_id: UserId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub category: String,
    pub region: String,
    pub city: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub status: DestinationStatus,
    pub featured: bool,
    pub reviews: ReviewAggregate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDestination {
    pub owner_id: UserId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub category: String,
    pub region: String,
    pub city: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub status: DestinationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DestinationUpdate {
    pub id: DestinationId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub status: Option<DestinationStatus>,
    pub featured: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl DestinationUpdate {
    pub fn new(id: DestinationId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            description: None,
            category: None,
            region: None,
            city: None,
            address: None,
            coordinates: None,
            status: None,
            featured: None,
            updated_at,
        }
    }
}
