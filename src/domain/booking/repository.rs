// src/domain/booking/repository.rs
use crate::domain::booking::entity::{Booking, BookingStatus, NewBooking};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::DomainResult;
use crate::domain::ids::BookingId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// With a departure, locks its row, takes `guests` slots and stores the
    /// booking in one transaction; `Conflict` when the slots ran out.
    async fn insert(&self, booking: NewBooking) -> DomainResult<Booking>;
    async fn find_by_id(&self, id: BookingId) -> DomainResult<Option<Booking>>;
    /// Writes the status only if it still equals `expected`; `Conflict` otherwise.
    /// Cancelling hands the departure slots back in the same transaction.
    async fn transition(
        &self,
        id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking>;
    async fn list_for_user(
        &self,
        user_id: UserId,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Booking>, Option<ListCursor>)>;
    /// Confirmed event bookings whose event starts after `now`.
    async fn upcoming_for_user(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>>;
}
