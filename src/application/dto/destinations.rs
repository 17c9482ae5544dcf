// src/application/dto/destinations.rs
use crate::domain::destination::{Destination, DestinationStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDto {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub city: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: DestinationStatus,
    pub featured: bool,
    pub rating: Option<f64>,
    pub review_count: u32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Destination> for DestinationDto {
    fn from(destination: Destination) -> Self {
        Self {
            id: destination.id.into(),
            owner_id: destination.owner_id.into(),
            title: destination.title,
            slug: destination.slug.into(),
            description: destination.description,
            category: destination.category,
            region: destination.region,
            city: destination.city,
            address: destination.address,
            latitude: destination.coordinates.latitude,
            longitude: destination.coordinates.longitude,
            status: destination.status,
            featured: destination.featured,
            rating: destination.reviews.rating,
            review_count: destination.reviews.review_count,
            created_at: destination.created_at,
            updated_at: destination.updated_at,
        }
    }
}
