// src/domain/business/entity.rs
use crate::domain::derived::ReviewAggregate;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::BusinessId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use crate::domain::validation::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Businesses start pending and become active once staff verify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessStatus {
    #[default]
    Pending,
    Active,
}

impl BusinessStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BusinessStatus::Pending => "pending",
            BusinessStatus::Active => "active",
        }
    }
}

impl fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BusinessStatus::Pending),
            "active" => Ok(BusinessStatus::Active),
            other => Err(DomainError::invalid(
                "status",
                format!("unknown business status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Business {
    pub id: BusinessId,
    pub owner_id: UserId,
    pub name: String,
    pub slug: Slug,
    pub business_type: String,
    pub description: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub region: String,
    pub city: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub status: BusinessStatus,
    pub is_verified: bool,
    pub verification_date: Option<DateTime<Utc>>,
    pub featured: bool,
    pub reviews: ReviewAggregate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Business {
    pub fn ensure_unverified(&self) -> DomainResult<()> {
        if self.is_verified {
            return Err(DomainError::Conflict("business is already verified".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub owner_id: UserId,
    pub name: String,
    pub slug: Slug,
    pub business_type: String,
    pub description: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub region: String,
    pub city: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub status: BusinessStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BusinessUpdate {
    pub id: BusinessId,
    pub name: Option<String>,
    pub slug: Option<Slug>,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<Option<String>>,
    pub contact_phone: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Option<Coordinates>>,
    pub status: Option<BusinessStatus>,
    pub verification_date: Option<DateTime<Utc>>,
    pub featured: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessUpdate {
    pub fn new(id: BusinessId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            business_type: None,
            description: None,
            contact_email: None,
            contact_phone: None,
            website: None,
            region: None,
            city: None,
            address: None,
            coordinates: None,
            status: None,
            verification_date: None,
            featured: None,
            updated_at,
        }
    }

    /// Verification marks the business active and stamps the date.
    pub fn verified(id: BusinessId, at: DateTime<Utc>) -> Self {
        Self {
            status: Some(BusinessStatus::Active),
            verification_date: Some(at),
            ..Self::new(id, at)
        }
    }
}
