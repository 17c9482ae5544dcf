// src/application/dto/departures.rs
use crate::domain::departure::Departure;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    pub id: i64,
    pub package_id: i64,
    #[serde(with = "serde_time")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub end_date: DateTime<Utc>,
    pub price_cents: i64,
    pub total_slots: i32,
    pub available_slots: i32,
    pub is_guaranteed: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Departure> for DepartureDto {
    fn from(departure: Departure) -> Self {
        Self {
            id: departure.id.into(),
            package_id: departure.package_id.into(),
            start_date: departure.start_date,
            end_date: departure.end_date,
            price_cents: departure.price_cents,
            total_slots: departure.total_slots,
            available_slots: departure.available_slots,
            is_guaranteed: departure.is_guaranteed,
            created_at: departure.created_at,
            updated_at: departure.updated_at,
        }
    }
}
