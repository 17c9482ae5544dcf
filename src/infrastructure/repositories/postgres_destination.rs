// src/infrastructure/repositories/postgres_destination.rs
use super::{
    map_sqlx,
    support::{Conditions, aggregate, order_and_limit, split_page},
};
use crate::domain::cursor::ListCursor;
use crate::domain::destination::{
    Destination, DestinationFilter, DestinationRepository, DestinationStatus, DestinationUpdate,
    NewDestination,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::DestinationId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use crate::domain::validation::Coordinates;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const DESTINATION_COLUMNS: &str = "id, owner_id, title, slug, description, category, region, \
     city, address, latitude, longitude, status, featured, rating, review_count, created_at, \
     updated_at";

#[derive(Clone)]
pub struct PostgresDestinationRepository {
    pool: PgPool,
}

impl PostgresDestinationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DestinationRow {
    id: i64,
    owner_id: i64,
    title: String,
    slug: String,
    description: String,
    category: String,
    region: String,
    city: String,
    address: String,
    latitude: f64,
    longitude: f64,
    status: String,
    featured: bool,
    rating: Option<f64>,
    review_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DestinationRow> for Destination {
    type Error = DomainError;

    fn try_from(row: DestinationRow) -> Result<Self, Self::Error> {
        Ok(Destination {
            id: DestinationId::new(row.id)?,
            owner_id: UserId::new(row.owner_id)?,
            title: row.title,
            slug: Slug::new(row.slug)?,
            description: row.description,
            category: row.category,
            region: row.region,
            city: row.city,
            address: row.address,
            coordinates: Coordinates::new(row.latitude, row.longitude)?,
            status: row.status.parse()?,
            featured: row.featured,
            reviews: aggregate(row.rating, row.review_count),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl DestinationRepository for PostgresDestinationRepository {
    async fn insert(&self, destination: NewDestination) -> DomainResult<Destination> {
        let row = sqlx::query_as::<_, DestinationRow>(&format!(
            "INSERT INTO destinations (owner_id, title, slug, description, category, region,
                 city, address, latitude, longitude, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
             RETURNING {DESTINATION_COLUMNS}"
        ))
        .bind(i64::from(destination.owner_id))
        .bind(destination.title)
        .bind(String::from(destination.slug))
        .bind(destination.description)
        .bind(destination.category)
        .bind(destination.region)
        .bind(destination.city)
        .bind(destination.address)
        .bind(destination.coordinates.latitude)
        .bind(destination.coordinates.longitude)
        .bind(destination.status.as_str())
        .bind(destination.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Destination::try_from(row)
    }

    async fn update(&self, update: DestinationUpdate) -> DomainResult<Destination> {
        let DestinationUpdate {
            id,
            title,
            description,
            category,
            region,
            city,
            address,
            coordinates,
            status,
            featured,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE destinations SET updated_at = ");
        builder.push_bind(updated_at);

        let texts = [
            ("title", title),
            ("description", description),
            ("category", category),
            ("region", region),
            ("city", city),
            ("address", address),
        ];
        for (column, value) in texts {
            if let Some(value) = value {
                builder.push(format!(", {column} = ")).push_bind(value);
            }
        }
        if let Some(coordinates) = coordinates {
            builder
                .push(", latitude = ")
                .push_bind(coordinates.latitude)
                .push(", longitude = ")
                .push_bind(coordinates.longitude);
        }
        if let Some(status) = status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(featured) = featured {
            builder.push(", featured = ").push_bind(featured);
        }

        builder.push(" WHERE id = ").push_bind(i64::from(id));
        builder.push(format!(" RETURNING {DESTINATION_COLUMNS}"));

        let row = builder
            .build_query_as::<DestinationRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("destination {id} not found")))?;

        Destination::try_from(row)
    }

    async fn delete(&self, id: DestinationId) -> DomainResult<()> {
        super::delete_with_dependents(&self.pool, "destinations", "destination", id.into()).await
    }

    async fn find_by_id(&self, id: DestinationId) -> DomainResult<Option<Destination>> {
        let row = sqlx::query_as::<_, DestinationRow>(&format!(
            "SELECT {DESTINATION_COLUMNS} FROM destinations WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Destination::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Destination>> {
        let row = sqlx::query_as::<_, DestinationRow>(&format!(
            "SELECT {DESTINATION_COLUMNS} FROM destinations WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Destination::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: DestinationFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Destination>, Option<ListCursor>)> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {DESTINATION_COLUMNS} FROM destinations"));
        let mut conditions = Conditions::default();

        conditions
            .next(&mut builder)
            .push("status = ")
            .push_bind(DestinationStatus::Published.as_str());
        if let Some(category) = filter.category {
            conditions
                .next(&mut builder)
                .push("category ILIKE ")
                .push_bind(category);
        }
        if let Some(region) = filter.region {
            conditions
                .next(&mut builder)
                .push("region ILIKE ")
                .push_bind(region);
        }
        if filter.featured_only {
            conditions.next(&mut builder).push("featured = TRUE");
        }
        conditions.search(
            &mut builder,
            &["title", "description", "city", "region"],
            filter.search,
        );
        conditions.cursor(&mut builder, cursor);
        order_and_limit(&mut builder, limit);

        let destinations = builder
            .build_query_as::<DestinationRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Destination::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(split_page(destinations, limit, |destination| {
            ListCursor::new(destination.created_at, destination.id.into())
        }))
    }
}
