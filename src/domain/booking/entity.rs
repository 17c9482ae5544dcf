// src/domain/booking/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::{BookingId, DepartureId};
use crate::domain::resource::ResourceKind;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MAX_GUESTS: i32 = 100;

/// `pending -> confirmed`, and either of those `-> cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn confirm(self) -> DomainResult<Self> {
        match self {
            BookingStatus::Pending => Ok(BookingStatus::Confirmed),
            BookingStatus::Confirmed => {
                Err(DomainError::Conflict("booking is already confirmed".into()))
            }
            BookingStatus::Cancelled => Err(DomainError::Conflict(
                "cancelled bookings cannot be confirmed".into(),
            )),
        }
    }

    pub fn cancel(self) -> DomainResult<Self> {
        match self {
            BookingStatus::Pending | BookingStatus::Confirmed => Ok(BookingStatus::Cancelled),
            BookingStatus::Cancelled => {
                Err(DomainError::Conflict("booking is already cancelled".into()))
            }
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(DomainError::invalid(
                "status",
                format!("unknown booking status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub target_kind: ResourceKind,
    pub target_id: i64,
    /// Package bookings may reserve `guests` slots on a departure.
    pub departure_id: Option<DepartureId>,
    pub guests: i32,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: UserId,
    pub target_kind: ResourceKind,
    pub target_id: i64,
    pub departure_id: Option<DepartureId>,
    pub guests: i32,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_bookings_confirm_then_cancel() {
        let confirmed = BookingStatus::Pending.confirm().unwrap();
        assert_eq!(confirmed, BookingStatus::Confirmed);
        assert_eq!(confirmed.cancel().unwrap(), BookingStatus::Cancelled);
    }

    #[test]
    fn double_cancel_is_a_conflict() {
        let err = BookingStatus::Cancelled.cancel().unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m == "booking is already cancelled"));
    }

    #[test]
    fn cancelled_bookings_stay_cancelled() {
        assert!(BookingStatus::Cancelled.confirm().is_err());
        assert!(BookingStatus::Confirmed.confirm().is_err());
    }
}
