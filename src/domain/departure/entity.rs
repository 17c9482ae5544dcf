// src/domain/departure/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::{DepartureId, PackageId};
use chrono::{DateTime, Utc};

pub const MAX_SLOTS: i32 = 500;

/// One scheduled run of a package. `available_slots` drops as bookings
/// reserve seats and recovers when they are cancelled.
#[derive(Debug, Clone)]
pub struct Departure {
    pub id: DepartureId,
    pub package_id: PackageId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price_cents: i64,
    pub total_slots: i32,
    pub available_slots: i32,
    pub is_guaranteed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Departure {
    pub fn reserved_slots(&self) -> i32 {
        self.total_slots - self.available_slots
    }

    pub fn has_left(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now
    }

    pub fn ensure_seats(&self, guests: i32) -> DomainResult<()> {
        if guests > self.available_slots {
            return Err(DomainError::Conflict(format!(
                "departure {} has {} slots left",
                self.id, self.available_slots
            )));
        }
        Ok(())
    }

    /// Available slots after changing the capacity to `total_slots`; the
    /// seats already reserved must still fit.
    pub fn resize(&self, total_slots: i32) -> DomainResult<i32> {
        let reserved = self.reserved_slots();
        if total_slots < reserved {
            return Err(DomainError::Conflict(format!(
                "departure {} already has {reserved} reserved slots",
                self.id
            )));
        }
        Ok(total_slots - reserved)
    }

    pub fn ensure_unreserved(&self) -> DomainResult<()> {
        if self.reserved_slots() > 0 {
            return Err(DomainError::Conflict(format!(
                "departure {} has active bookings",
                self.id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewDeparture {
    pub package_id: PackageId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price_cents: i64,
    pub total_slots: i32,
    pub is_guaranteed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DepartureUpdate {
    pub id: DepartureId,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub total_slots: Option<i32>,
    pub is_guaranteed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl DepartureUpdate {
    pub fn new(id: DepartureId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            start_date: None,
            end_date: None,
            price_cents: None,
            total_slots: None,
            is_guaranteed: None,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn departure(total: i32, available: i32) -> Departure {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap();
        Departure {
            id: DepartureId(3),
            package_id: PackageId(1),
            start_date: start,
            end_date: start + chrono::Duration::days(4),
            price_cents: 90_000,
            total_slots: total,
            available_slots: available,
            is_guaranteed: false,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn seats_beyond_the_remaining_slots_conflict() {
        let nearly_full = departure(12, 2);
        assert!(nearly_full.ensure_seats(2).is_ok());
        let err = nearly_full.ensure_seats(3).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m == "departure 3 has 2 slots left"));
    }

    #[test]
    fn resizing_keeps_reserved_seats() {
        let half_booked = departure(10, 4);
        assert_eq!(half_booked.resize(8).unwrap(), 2);
        assert_eq!(half_booked.resize(6).unwrap(), 0);
        assert!(half_booked.resize(5).is_err());
    }

    #[test]
    fn only_unbooked_departures_may_go() {
        assert!(departure(10, 10).ensure_unreserved().is_ok());
        assert!(departure(10, 9).ensure_unreserved().is_err());
    }
}
