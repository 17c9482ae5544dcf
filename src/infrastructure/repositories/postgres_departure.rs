// src/infrastructure/repositories/postgres_departure.rs
use super::map_sqlx;
use crate::domain::departure::{Departure, DepartureRepository, DepartureUpdate, NewDeparture};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::{DepartureId, PackageId};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const DEPARTURE_COLUMNS: &str = "id, package_id, start_date, end_date, price_cents, total_slots, \
     available_slots, is_guaranteed, created_at, updated_at";

/// Scheduled package departures and their slot counts.
#[derive(Clone)]
pub struct PostgresDepartureRepository {
    pool: PgPool,
}

impl PostgresDepartureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DepartureRow {
    id: i64,
    package_id: i64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    price_cents: i64,
    total_slots: i32,
    available_slots: i32,
    is_guaranteed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DepartureRow> for Departure {
    type Error = DomainError;

    fn try_from(row: DepartureRow) -> Result<Self, Self::Error> {
        Ok(Departure {
            id: DepartureId::new(row.id)?,
            package_id: PackageId::new(row.package_id)?,
            start_date: row.start_date,
            end_date: row.end_date,
            price_cents: row.price_cents,
            total_slots: row.total_slots,
            available_slots: row.available_slots,
            is_guaranteed: row.is_guaranteed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `SELECT ... FOR UPDATE` on one departure; shared with the booking
/// repository, which takes and returns slots under this lock.
pub(super) async fn lock_departure(
    conn: &mut PgConnection,
    id: DepartureId,
) -> DomainResult<Departure> {
    let row = sqlx::query_as::<_, DepartureRow>(&format!(
        "SELECT {DEPARTURE_COLUMNS} FROM package_departures WHERE id = $1 FOR UPDATE"
    ))
    .bind(i64::from(id))
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_sqlx)?
    .ok_or_else(|| DomainError::NotFound(format!("departure {id} not found")))?;

    Departure::try_from(row)
}

#[async_trait]
impl DepartureRepository for PostgresDepartureRepository {
    async fn insert(&self, departure: NewDeparture) -> DomainResult<Departure> {
        let row = sqlx::query_as::<_, DepartureRow>(&format!(
            "INSERT INTO package_departures (package_id, start_date, end_date, price_cents,
                 total_slots, available_slots, is_guaranteed, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $7)
             RETURNING {DEPARTURE_COLUMNS}"
        ))
        .bind(i64::from(departure.package_id))
        .bind(departure.start_date)
        .bind(departure.end_date)
        .bind(departure.price_cents)
        .bind(departure.total_slots)
        .bind(departure.is_guaranteed)
        .bind(departure.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Departure::try_from(row)
    }

    async fn update(&self, update: DepartureUpdate) -> DomainResult<Departure> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let current = lock_departure(&mut tx, update.id).await?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE package_departures SET updated_at = ");
        builder.push_bind(update.updated_at);
        if let Some(start_date) = update.start_date {
            builder.push(", start_date = ").push_bind(start_date);
        }
        if let Some(end_date) = update.end_date {
            builder.push(", end_date = ").push_bind(end_date);
        }
        if let Some(price) = update.price_cents {
            builder.push(", price_cents = ").push_bind(price);
        }
        if let Some(total) = update.total_slots {
            let available = current.resize(total)?;
            builder
                .push(", total_slots = ")
                .push_bind(total)
                .push(", available_slots = ")
                .push_bind(available);
        }
        if let Some(guaranteed) = update.is_guaranteed {
            builder.push(", is_guaranteed = ").push_bind(guaranteed);
        }
        builder.push(" WHERE id = ").push_bind(i64::from(update.id));
        builder.push(format!(" RETURNING {DEPARTURE_COLUMNS}"));

        let row = builder
            .build_query_as::<DepartureRow>()
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Departure::try_from(row)
    }

    async fn delete(&self, id: DepartureId) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        lock_departure(&mut tx, id).await?.ensure_unreserved()?;

        sqlx::query("DELETE FROM package_departures WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn find_by_id(&self, id: DepartureId) -> DomainResult<Option<Departure>> {
        let row = sqlx::query_as::<_, DepartureRow>(&format!(
            "SELECT {DEPARTURE_COLUMNS} FROM package_departures WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Departure::try_from).transpose()
    }

    async fn list_for_package(
        &self,
        package_id: PackageId,
        from: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<Departure>> {
        sqlx::query_as::<_, DepartureRow>(&format!(
            "SELECT {DEPARTURE_COLUMNS} FROM package_departures
             WHERE package_id = $1 AND ($2::TIMESTAMPTZ IS NULL OR start_date > $2)
             ORDER BY start_date, id"
        ))
        .bind(i64::from(package_id))
        .bind(from)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Departure::try_from)
        .collect()
    }

    async fn list_for_owner(&self, owner: UserId) -> DomainResult<Vec<Departure>> {
        sqlx::query_as::<_, DepartureRow>(
            "SELECT d.id, d.package_id, d.start_date, d.end_date, d.price_cents, d.total_slots,
                    d.available_slots, d.is_guaranteed, d.created_at, d.updated_at
             FROM package_departures d JOIN packages p ON p.id = d.package_id
             WHERE p.owner_id = $1
             ORDER BY d.start_date, d.id",
        )
        .bind(i64::from(owner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Departure::try_from)
        .collect()
    }
}
