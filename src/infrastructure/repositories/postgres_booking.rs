// src/infrastructure/repositories/postgres_booking.rs
use super::{
    map_sqlx,
    support::{Conditions, order_and_limit, split_page},
};
use crate::domain::booking::{Booking, BookingRepository, BookingStatus, NewBooking};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::departure::Departure;
use crate::domain::ids::{BookingId, DepartureId};
use crate::domain::resource::ResourceKind;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const BOOKING_COLUMNS: &str = "id, user_id, target_kind, target_id, departure_id, guests, status, \
     notes, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookingRow {
    id: i64,
    user_id: i64,
    target_kind: String,
    target_id: i64,
    departure_id: Option<i64>,
    guests: i32,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: BookingId::new(row.id)?,
            user_id: UserId::new(row.user_id)?,
            target_kind: row.target_kind.parse()?,
            target_id: row.target_id,
            departure_id: row.departure_id.map(DepartureId::new).transpose()?,
            guests: row.guests,
            status: row.status.parse()?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn insert(&self, booking: NewBooking) -> DomainResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        if let Some(departure_id) = booking.departure_id {
            let departure = super::postgres_departure::lock_departure(&mut tx, departure_id).await?;
            take_slots(&mut tx, &departure, booking.guests).await?;
        }

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "INSERT INTO bookings (user_id, target_kind, target_id, departure_id, guests, status,
                 notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(i64::from(booking.user_id))
        .bind(booking.target_kind.as_str())
        .bind(booking.target_id)
        .bind(booking.departure_id.map(i64::from))
        .bind(booking.guests)
        .bind(booking.status.as_str())
        .bind(booking.notes)
        .bind(booking.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Booking::try_from(row)
    }

    async fn find_by_id(&self, id: BookingId) -> DomainResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Booking::try_from).transpose()
    }

    async fn transition(
        &self,
        id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "UPDATE bookings SET status = $3, updated_at = $4
             WHERE id = $1 AND status = $2
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(expected.as_str())
        .bind(next.as_str())
        .bind(at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let booking = match row {
            Some(row) => Booking::try_from(row)?,
            None => {
                return Err(DomainError::Conflict(format!(
                    "booking {id} is no longer {expected}"
                )));
            }
        };
        if next == BookingStatus::Cancelled {
            if let Some(departure_id) = booking.departure_id {
                super::postgres_departure::lock_departure(&mut tx, departure_id).await?;
                release_slots(&mut tx, departure_id, booking.guests).await?;
            }
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(booking)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Booking>, Option<ListCursor>)> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {BOOKING_COLUMNS} FROM bookings"));
        let mut conditions = Conditions::default();
        conditions
            .next(&mut builder)
            .push("user_id = ")
            .push_bind(i64::from(user_id));
        conditions.cursor(&mut builder, cursor);
        order_and_limit(&mut builder, limit);

        let bookings = builder
            .build_query_as::<BookingRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Booking::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(split_page(bookings, limit, |booking| {
            ListCursor::new(booking.created_at, booking.id.into())
        }))
    }

    async fn upcoming_for_user(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(
            "SELECT b.id, b.user_id, b.target_kind, b.target_id, b.departure_id, b.guests,
                    b.status, b.notes, b.created_at, b.updated_at
             FROM bookings b JOIN events e ON e.id = b.target_id
             WHERE b.user_id = $1 AND b.target_kind = $2 AND b.status = $3
               AND e.start_date > $4
             ORDER BY e.start_date, b.id",
        )
        .bind(i64::from(user_id))
        .bind(ResourceKind::Event.as_str())
        .bind(BookingStatus::Confirmed.as_str())
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Booking::try_from)
        .collect()
    }
}

/// Runs with the departure row locked by the caller.
async fn take_slots(
    conn: &mut PgConnection,
    departure: &Departure,
    guests: i32,
) -> DomainResult<()> {
    departure.ensure_seats(guests)?;
    sqlx::query(
        "UPDATE package_departures SET available_slots = available_slots - $2 WHERE id = $1",
    )
    .bind(i64::from(departure.id))
    .bind(guests)
    .execute(conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

async fn release_slots(
    conn: &mut PgConnection,
    departure_id: DepartureId,
    guests: i32,
) -> DomainResult<()> {
    sqlx::query(
        "UPDATE package_departures
         SET available_slots = LEAST(total_slots, available_slots + $2)
         WHERE id = $1",
    )
    .bind(i64::from(departure_id))
    .bind(guests)
    .execute(conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}
