// src/infrastructure/repositories/postgres_event.rs
use super::{
    map_sqlx,
    support::{Conditions, Keyset, aggregate, coordinates, order_on_and_limit, split_page},
};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::event::{
    Event, EventFilter, EventOrder, EventRepository, EventStatus, EventUpdate, NewEvent,
    Registration, RegistrationRepository, RegistrationStatus, registration::confirmed_attendees,
};
use crate::domain::ids::{EventId, RegistrationId};
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const EVENT_COLUMNS: &str = "id, organizer_id, title, slug, description, category, start_date, \
     end_date, location, address, latitude, longitude, price_cents, capacity, current_attendees, \
     status, featured, rating, review_count, created_at, updated_at";

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, status, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: i64,
    organizer_id: i64,
    title: String,
    slug: String,
    description: String,
    category: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    location: String,
    address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    price_cents: i64,
    capacity: Option<i32>,
    current_attendees: i32,
    status: String,
    featured: bool,
    rating: Option<f64>,
    review_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId::new(row.id)?,
            organizer_id: UserId::new(row.organizer_id)?,
            title: row.title,
            slug: Slug::new(row.slug)?,
            description: row.description,
            category: row.category,
            start_date: row.start_date,
            end_date: row.end_date,
            location: row.location,
            address: row.address,
            coordinates: coordinates(row.latitude, row.longitude)?,
            price_cents: row.price_cents,
            capacity: row.capacity,
            current_attendees: row.current_attendees,
            status: row.status.parse()?,
            featured: row.featured,
            reviews: aggregate(row.rating, row.review_count),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct RegistrationRow {
    id: i64,
    event_id: i64,
    user_id: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = DomainError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        Ok(Registration {
            id: RegistrationId::new(row.id)?,
            event_id: EventId::new(row.event_id)?,
            user_id: UserId::new(row.user_id)?,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn insert(&self, event: NewEvent) -> DomainResult<Event> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "INSERT INTO events (organizer_id, title, slug, description, category, start_date,
                 end_date, location, address, latitude, longitude, price_cents, capacity, status,
                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(i64::from(event.organizer_id))
        .bind(event.title)
        .bind(String::from(event.slug))
        .bind(event.description)
        .bind(event.category)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.location)
        .bind(event.address)
        .bind(event.coordinates.map(|c| c.latitude))
        .bind(event.coordinates.map(|c| c.longitude))
        .bind(event.price_cents)
        .bind(event.capacity)
        .bind(event.status.as_str())
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Event::try_from(row)
    }

    async fn update(&self, update: EventUpdate) -> DomainResult<Event> {
        let EventUpdate {
            id,
            title,
            description,
            category,
            start_date,
            end_date,
            location,
            address,
            coordinates,
            price_cents,
            capacity,
            status,
            featured,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE events SET updated_at = ");
        builder.push_bind(updated_at);

        let texts = [
            ("title", title),
            ("description", description),
            ("category", category),
            ("location", location),
            ("address", address),
        ];
        for (column, value) in texts {
            if let Some(value) = value {
                builder.push(format!(", {column} = ")).push_bind(value);
            }
        }
        if let Some(start) = start_date {
            builder.push(", start_date = ").push_bind(start);
        }
        if let Some(end) = end_date {
            builder.push(", end_date = ").push_bind(end);
        }
        if let Some(coordinates) = coordinates {
            builder
                .push(", latitude = ")
                .push_bind(coordinates.map(|c| c.latitude))
                .push(", longitude = ")
                .push_bind(coordinates.map(|c| c.longitude));
        }
        if let Some(price) = price_cents {
            builder.push(", price_cents = ").push_bind(price);
        }
        if let Some(capacity) = capacity {
            builder.push(", capacity = ").push_bind(capacity);
        }
        if let Some(status) = status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(featured) = featured {
            builder.push(", featured = ").push_bind(featured);
        }

        builder.push(" WHERE id = ").push_bind(i64::from(id));
        builder.push(format!(" RETURNING {EVENT_COLUMNS}"));

        let row = builder
            .build_query_as::<EventRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("event {id} not found")))?;

        Event::try_from(row)
    }

    async fn delete(&self, id: EventId) -> DomainResult<()> {
        super::delete_with_dependents(&self.pool, "events", "event", id.into()).await
    }

    async fn find_by_id(&self, id: EventId) -> DomainResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Event::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Event::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: EventFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Event>, Option<ListCursor>)> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {EVENT_COLUMNS} FROM events"));
        let mut conditions = Conditions::default();

        match filter.organizer {
            Some(organizer) => {
                conditions
                    .next(&mut builder)
                    .push("organizer_id = ")
                    .push_bind(i64::from(organizer));
            }
            None => {
                conditions
                    .next(&mut builder)
                    .push("status = ")
                    .push_bind(EventStatus::Published.as_str());
            }
        }
        if let Some(category) = filter.category {
            conditions
                .next(&mut builder)
                .push("category ILIKE ")
                .push_bind(category);
        }
        if let Some(after) = filter.starting_after {
            conditions
                .next(&mut builder)
                .push("start_date > ")
                .push_bind(after);
        }
        if filter.featured_only {
            conditions.next(&mut builder).push("featured = TRUE");
        }
        conditions.search(
            &mut builder,
            &["title", "description", "location"],
            filter.search,
        );
        let order = filter.order;
        let keyset = match order {
            EventOrder::Newest => Keyset::NEWEST,
            EventOrder::SoonestFirst => Keyset::ascending("start_date"),
        };
        conditions.cursor_on(&mut builder, keyset, cursor);
        order_on_and_limit(&mut builder, keyset, limit);

        let events = builder
            .build_query_as::<EventRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Event::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(split_page(events, limit, |event| match order {
            EventOrder::Newest => ListCursor::new(event.created_at, event.id.into()),
            EventOrder::SoonestFirst => ListCursor::new(event.start_date, event.id.into()),
        }))
    }

    async fn categories(&self) -> DomainResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM events WHERE status = $1 ORDER BY category",
        )
        .bind(EventStatus::Published.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Event>> {
        sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE status = $1 AND start_date >= $2 AND start_date < $3
             ORDER BY start_date, id"
        ))
        .bind(EventStatus::Published.as_str())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Event::try_from)
        .collect()
    }
}

/// Registrations; seat accounting runs with the event row locked.
#[derive(Clone)]
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lock_event(conn: &mut PgConnection, event_id: EventId) -> DomainResult<Event> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE"
        ))
        .bind(i64::from(event_id))
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("event {event_id} not found")))?;

        Event::try_from(row)
    }

    async fn find_in(
        conn: &mut PgConnection,
        event_id: EventId,
        user_id: UserId,
    ) -> DomainResult<Option<Registration>> {
        sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations
             WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(i64::from(event_id))
        .bind(i64::from(user_id))
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?
        .map(Registration::try_from)
        .transpose()
    }

    /// Rewrites `current_attendees` from the registration rows.
    async fn recount(conn: &mut PgConnection, event_id: EventId) -> DomainResult<i32> {
        let registrations = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations WHERE event_id = $1"
        ))
        .bind(i64::from(event_id))
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Registration::try_from)
        .collect::<DomainResult<Vec<_>>>()?;

        let attendees = confirmed_attendees(&registrations);
        sqlx::query("UPDATE events SET current_attendees = $2 WHERE id = $1")
            .bind(i64::from(event_id))
            .bind(attendees)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        Ok(attendees)
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn find(&self, event_id: EventId, user_id: UserId) -> DomainResult<Option<Registration>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        Self::find_in(&mut conn, event_id, user_id).await
    }

    async fn list_confirmed(&self, event_id: EventId) -> DomainResult<Vec<Registration>> {
        sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations
             WHERE event_id = $1 AND status = $2
             ORDER BY created_at, id"
        ))
        .bind(i64::from(event_id))
        .bind(RegistrationStatus::Confirmed.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Registration::try_from)
        .collect()
    }

    async fn admit(
        &self,
        event_id: EventId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Registration, i32)> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let event = Self::lock_event(&mut tx, event_id).await?;
        event.ensure_accepts_registrations()?;
        if let Some(existing) = Self::find_in(&mut tx, event_id, user_id).await? {
            existing.ensure_not_confirmed()?;
        }

        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "INSERT INTO event_registrations (event_id, user_id, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             ON CONFLICT (event_id, user_id)
             DO UPDATE SET status = EXCLUDED.status, updated_at = EXCLUDED.updated_at
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(i64::from(event_id))
        .bind(i64::from(user_id))
        .bind(RegistrationStatus::Confirmed.as_str())
        .bind(at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        let registration = Registration::try_from(row)?;

        let attendees = Self::recount(&mut tx, event_id).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok((registration, attendees))
    }

    async fn cancel(
        &self,
        event_id: EventId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Registration, i32)> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        Self::lock_event(&mut tx, event_id).await?;
        let existing = Self::find_in(&mut tx, event_id, user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("no registration for this event".into()))?;
        existing.ensure_cancellable()?;

        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "UPDATE event_registrations SET status = $2, updated_at = $3
             WHERE id = $1
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(i64::from(existing.id))
        .bind(RegistrationStatus::Cancelled.as_str())
        .bind(at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        let registration = Registration::try_from(row)?;

        let attendees = Self::recount(&mut tx, event_id).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok((registration, attendees))
    }
}
