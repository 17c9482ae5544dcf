// src/application/dto/bookings.rs
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::resource::ResourceKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i64,
    pub user_id: i64,
    pub target_kind: ResourceKind,
    pub target_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_id: Option<i64>,
    pub guests: i32,
    pub status: BookingStatus,
    pub notes: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.into(),
            user_id: booking.user_id.into(),
            target_kind: booking.target_kind,
            target_id: booking.target_id,
            departure_id: booking.departure_id.map(i64::from),
            guests: booking.guests,
            status: booking.status,
            notes: booking.notes,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
