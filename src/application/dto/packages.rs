// src/application/dto/packages.rs
use crate::domain::package::{Package, PackageStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDto {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub location: String,
    pub region: String,
    pub category: String,
    pub price_cents: i64,
    pub discounted_price_cents: Option<i64>,
    pub duration_in_days: i32,
    pub max_group_size: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: PackageStatus,
    pub featured: bool,
    pub rating: Option<f64>,
    pub review_count: u32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Package> for PackageDto {
    fn from(package: Package) -> Self {
        Self {
            id: package.id.into(),
            owner_id: package.owner_id.into(),
            title: package.title,
            slug: package.slug.into(),
            description: package.description,
            short_description: package.short_description,
            location: package.location,
            region: package.region,
            category: package.category,
            price_cents: package.price_cents,
            discounted_price_cents: package.discounted_price_cents,
            duration_in_days: package.duration_in_days,
            max_group_size: package.max_group_size,
            latitude: package.coordinates.map(|c| c.latitude),
            longitude: package.coordinates.map(|c| c.longitude),
            status: package.status,
            featured: package.featured,
            rating: package.reviews.rating,
            review_count: package.reviews.review_count,
            created_at: package.created_at,
            updated_at: package.updated_at,
        }
    }
}
