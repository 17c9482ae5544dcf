// src/application/dto/businesses.rs
use crate::domain::business::{Business, BusinessStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDto {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub slug: String,
    pub business_type: String,
    pub description: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub region: String,
    pub city: String,
    pub address: String,
    /// `[longitude, latitude]`, the order accepted on create.
    pub coordinates: Option<[f64; 2]>,
    pub status: BusinessStatus,
    pub is_verified: bool,
    #[serde(with = "serde_time::option")]
    pub verification_date: Option<DateTime<Utc>>,
    pub is_featured: bool,
    pub rating: Option<f64>,
    pub review_count: u32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Business> for BusinessDto {
    fn from(business: Business) -> Self {
        Self {
            id: business.id.into(),
            owner_id: business.owner_id.into(),
            name: business.name,
            slug: business.slug.into(),
            business_type: business.business_type,
            description: business.description,
            contact_email: business.contact_email,
            contact_phone: business.contact_phone,
            website: business.website,
            region: business.region,
            city: business.city,
            address: business.address,
            coordinates: business.coordinates.map(|c| [c.longitude, c.latitude]),
            status: business.status,
            is_verified: business.is_verified,
            verification_date: business.verification_date,
            is_featured: business.featured,
            rating: business.reviews.rating,
            review_count: business.reviews.review_count,
            created_at: business.created_at,
            updated_at: business.updated_at,
        }
    }
}
