// src/domain/package/entity.rs
use crate::domain::derived::ReviewAggregate;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::PackageId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use crate::domain::validation::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Draft,
    #[default]
    Active,
}

impl PackageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageStatus::Draft => "draft",
            PackageStatus::Active => "active",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PackageStatus::Draft => PackageStatus::Active,
            PackageStatus::Active => PackageStatus::Draft,
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PackageStatus::Draft),
            "active" => Ok(PackageStatus::Active),
            other => Err(DomainError::invalid(
                "status",
                format!("unknown package status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Package {
    pub id: PackageId,
    pub owner_id: UserId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub short_description: String,
    pub location: String,
    pub region: String,
    pub category: String,
    pub price_cents: i64,
    pub discounted_price_cents: Option<i64>,
    pub duration_in_days: i32,
    pub max_group_size: Option<i32>,
    pub coordinates: Option<Coordinates>,
    pub status: PackageStatus,
    pub featured: bool,
    pub reviews: ReviewAggregate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A discount has to undercut the list price.
pub fn ensure_discount(price_cents: i64, discounted_price_cents: Option<i64>) -> DomainResult<()> {
    match discounted_price_cents {
        Some(discounted) if discounted > price_cents => Err(DomainError::invalid(
            "discounted_price_cents",
            "discounted price cannot exceed the price",
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct NewPackage {
    pub owner_id: UserId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub short_description: String,
    pub location: String,
    pub region: String,
    pub category: String,
    pub price_cents: i64,
    pub discounted_price_cents: Option<i64>,
    pub duration_in_days: i32,
    pub max_group_size: Option<i32>,
    pub coordinates: Option<Coordinates>,
    pub status: PackageStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PackageUpdate {
    pub id: PackageId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub discounted_price_cents: Option<Option<i64>>,
    pub duration_in_days: Option<i32>,
    pub max_group_size: Option<Option<i32>>,
    pub coordinates: Option<Option<Coordinates>>,
    pub status: Option<PackageStatus>,
    pub featured: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl PackageUpdate {
    pub fn new(id: PackageId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            description: None,
            short_description: None,
            location: None,
            region: None,
            category: None,
            price_cents: None,
            discounted_price_cents: None,
            duration_in_days: None,
            max_group_size: None,
            coordinates: None,
            status: None,
            featured: None,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_must_not_exceed_price() {
        assert!(ensure_discount(10_000, None).is_ok());
        assert!(ensure_discount(10_000, Some(10_000)).is_ok());
        let err = ensure_discount(10_000, Some(12_000)).unwrap_err();
        assert_eq!(err.field(), Some("discounted_price_cents"));
    }

    #[test]
    fn status_toggles_both_ways() {
        assert_eq!(PackageStatus::Active.toggled(), PackageStatus::Draft);
        assert_eq!(PackageStatus::Draft.toggled(), PackageStatus::Active);
    }
}
