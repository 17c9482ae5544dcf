// src/application/commands/bookings/service.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::capability::{ensure_capability, ensure_owner_or_any},
        dto::{AuthenticatedUser, BookingDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        booking::{Booking, BookingRepository, BookingStatus, NewBooking, entity::MAX_GUESTS},
        departure::DepartureRepository,
        errors::DomainError,
        ids::{BookingId, DepartureId},
        resource::{RecordLookup, ResourceKind},
        validation::{ensure_in_range, ensure_max_len},
    },
};
use tracing::info;

pub const MAX_NOTES_LEN: usize = 1_000;

pub struct CreateBookingCommand {
    pub target_kind: ResourceKind,
    pub target_id: i64,
    pub guests: i32,
    pub notes: Option<String>,
    /// Reserves seats on a scheduled departure; packages only.
    pub departure_id: Option<i64>,
}

pub struct BookingCommandService {
    bookings: Arc<dyn BookingRepository>,
    departures: Arc<dyn DepartureRepository>,
    records: Arc<dyn RecordLookup>,
    clock: Arc<dyn Clock>,
}

impl BookingCommandService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        departures: Arc<dyn DepartureRepository>,
        records: Arc<dyn RecordLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            departures,
            records,
            clock,
        }
    }

    pub async fn create_booking(
        &self,
        actor: &AuthenticatedUser,
        command: CreateBookingCommand,
    ) -> ApplicationResult<BookingDto> {
        ensure_capability(actor, "bookings", "create")?;
        command.target_kind.ensure_bookable()?;
        let guests = ensure_in_range("guests", command.guests, 1, MAX_GUESTS)?;
        if let Some(notes) = command.notes.as_deref() {
            ensure_max_len("notes", notes, MAX_NOTES_LEN)?;
        }
        if self
            .records
            .owner_of(command.target_kind, command.target_id)
            .await?
            .is_none()
        {
            return Err(ApplicationError::missing(
                command.target_kind.profile().label,
                command.target_id,
            ));
        }
        let departure_id = match command.departure_id {
            Some(id) => Some(self.check_departure(&command, id, guests).await?),
            None => None,
        };

        let booking = self
            .bookings
            .insert(NewBooking {
                user_id: actor.id,
                target_kind: command.target_kind,
                target_id: command.target_id,
                guests,
                departure_id,
                status: BookingStatus::default(),
                notes: command.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
                created_at: self.clock.now(),
            })
            .await?;
        info!(
            booking_id = %booking.id,
            kind = %booking.target_kind,
            target_id = booking.target_id,
            "created booking"
        );

        Ok(booking.into())
    }

    /// Staff, or the owner of the booked package or event.
    pub async fn confirm_booking(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<BookingDto> {
        let booking = self.load(id).await?;
        let target_owner = self
            .records
            .owner_of(booking.target_kind, booking.target_id)
            .await?;
        let owns_target = target_owner == Some(actor.id);
        if !owns_target {
            ensure_capability(actor, "bookings", "confirm")?;
        }

        let next = booking.status.confirm()?;
        let confirmed = self
            .bookings
            .transition(booking.id, booking.status, next, self.clock.now())
            .await?;
        Ok(confirmed.into())
    }

    pub async fn cancel_booking(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<BookingDto> {
        let booking = self.load(id).await?;
        ensure_owner_or_any(actor, ResourceKind::Booking, "cancel", booking.user_id)?;

        let next = booking.status.cancel()?;
        let cancelled = self
            .bookings
            .transition(booking.id, booking.status, next, self.clock.now())
            .await?;
        info!(booking_id = %cancelled.id, "cancelled booking");
        Ok(cancelled.into())
    }

    /// Early rejection only; the repository re-checks seats under the row lock.
    async fn check_departure(
        &self,
        command: &CreateBookingCommand,
        id: i64,
        guests: i32,
    ) -> ApplicationResult<DepartureId> {
        if command.target_kind != ResourceKind::Package {
            return Err(
                DomainError::invalid("departure_id", "only packages have departures").into(),
            );
        }
        let id = DepartureId::new(id)?;
        let departure = self
            .departures
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("departure", id))?;
        if i64::from(departure.package_id) != command.target_id {
            return Err(DomainError::invalid(
                "departure_id",
                "departure belongs to another package",
            )
            .into());
        }
        if departure.has_left(self.clock.now()) {
            return Err(DomainError::invalid("departure_id", "departure has already left").into());
        }
        departure.ensure_seats(guests)?;
        Ok(departure.id)
    }

    async fn load(&self, id: i64) -> ApplicationResult<Booking> {
        let id = BookingId::new(id)?;
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("booking", id))
    }
}
