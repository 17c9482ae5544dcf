// src/domain/validation.rs
//! Input checks shared by every resource family.
//!
//! Each check accepts an optional value uniformly: `None` means "not
//! provided" and passes, a provided value is always checked.
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const LATITUDE_BOUND: f64 = 90.0;
pub const LONGITUDE_BOUND: f64 = 180.0;

pub fn ensure_in_range<T>(field: &'static str, value: T, min: T, max: T) -> DomainResult<T>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if value < min || value > max {
        return Err(DomainError::invalid(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

pub fn ensure_rating(value: i32) -> DomainResult<i32> {
    ensure_in_range("rating", value, MIN_RATING, MAX_RATING)
}

pub fn ensure_latitude(value: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::invalid("latitude", "must be a finite number"));
    }
    ensure_in_range("latitude", value, -LATITUDE_BOUND, LATITUDE_BOUND)
}

pub fn ensure_longitude(value: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::invalid("longitude", "must be a finite number"));
    }
    ensure_in_range("longitude", value, -LONGITUDE_BOUND, LONGITUDE_BOUND)
}

pub fn ensure_date_order(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<()> {
    if end <= start {
        return Err(DomainError::invalid(
            "end_date",
            "end date must be after start date",
        ));
    }
    Ok(())
}

pub fn ensure_not_blank(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(field, "cannot be empty"));
    }
    Ok(())
}

pub fn ensure_max_len(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::invalid(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Required, trimmed text of bounded length.
pub fn required_text(
    field: &'static str,
    value: impl Into<String>,
    max: usize,
) -> DomainResult<String> {
    let value = value.into();
    ensure_not_blank(field, &value)?;
    let trimmed = value.trim().to_string();
    ensure_max_len(field, &trimmed, max)?;
    Ok(trimmed)
}

pub fn ensure_optional<T, F>(value: Option<T>, check: F) -> DomainResult<Option<T>>
where
    F: FnOnce(T) -> DomainResult<T>,
{
    value.map(check).transpose()
}

pub fn ensure_non_negative(field: &'static str, value: i64) -> DomainResult<i64> {
    if value < 0 {
        return Err(DomainError::invalid(field, "cannot be negative"));
    }
    Ok(value)
}

pub fn ensure_positive(field: &'static str, value: i32) -> DomainResult<i32> {
    if value <= 0 {
        return Err(DomainError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        Ok(Self {
            latitude: ensure_latitude(latitude)?,
            longitude: ensure_longitude(longitude)?,
        })
    }

    /// Accepts the `[longitude, latitude]` pair order used by GeoJSON payloads.
    pub fn from_lon_lat(pair: &[f64]) -> DomainResult<Self> {
        match pair {
            [longitude, latitude] => Self::new(*latitude, *longitude),
            _ => Err(DomainError::invalid(
                "coordinates",
                "coordinates must be an array of [longitude, latitude]",
            )),
        }
    }

    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> DomainResult<Option<Self>> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            (None, None) => Ok(None),
            (Some(_), None) => Err(DomainError::invalid(
                "longitude",
                "longitude is required when latitude is provided",
            )),
            (None, Some(_)) => Err(DomainError::invalid(
                "latitude",
                "latitude is required when longitude is provided",
            )),
        }
    }
}
