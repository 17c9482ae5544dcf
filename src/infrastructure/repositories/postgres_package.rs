// src/infrastructure/repositories/postgres_package.rs
use super::{
    map_sqlx,
    support::{Conditions, aggregate, coordinates, order_and_limit, split_page},
};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::PackageId;
use crate::domain::package::{
    NewPackage, Package, PackageFilter, PackageRepository, PackageStatus, PackageUpdate,
};
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const PACKAGE_COLUMNS: &str = "id, owner_id, title, slug, description, short_description, \
     location, region, category, price_cents, discounted_price_cents, duration_in_days, \
     max_group_size, latitude, longitude, status, featured, rating, review_count, created_at, \
     updated_at";

#[derive(Clone)]
pub struct PostgresPackageRepository {
    pool: PgPool,
}

impl PostgresPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn distinct_active(&self, column: &str) -> DomainResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(&format!(
            "SELECT DISTINCT {column} FROM packages WHERE status = $1 ORDER BY {column}"
        ))
        .bind(PackageStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

#[derive(Debug, FromRow)]
struct PackageRow {
    id: i64,
    owner_id: i64,
    title: String,
    slug: String,
    description: String,
    short_description: String,
    location: String,
    region: String,
    category: String,
    price_cents: i64,
    discounted_price_cents: Option<i64>,
    duration_in_days: i32,
    max_group_size: Option<i32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    status: String,
    featured: bool,
    rating: Option<f64>,
    review_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PackageRow> for Package {
    type Error = DomainError;

    fn try_from(row: PackageRow) -> Result<Self, Self::Error> {
        Ok(Package {
            id: PackageId::new(row.id)?,
            owner_id: UserId::new(row.owner_id)?,
            title: row.title,
            slug: Slug::new(row.slug)?,
            description: row.description,
            short_description: row.short_description,
            location: row.location,
            region: row.region,
            category: row.category,
            price_cents: row.price_cents,
            discounted_price_cents: row.discounted_price_cents,
            duration_in_days: row.duration_in_days,
            max_group_size: row.max_group_size,
            coordinates: coordinates(row.latitude, row.longitude)?,
            status: row.status.parse()?,
            featured: row.featured,
            reviews: aggregate(row.rating, row.review_count),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl PackageRepository for PostgresPackageRepository {
    async fn insert(&self, package: NewPackage) -> DomainResult<Package> {
        let row = sqlx::query_as::<_, PackageRow>(&format!(
            "INSERT INTO packages (owner_id, title, slug, description, short_description, location,
                 region, category, price_cents, discounted_price_cents, duration_in_days,
                 max_group_size, latitude, longitude, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16)
             RETURNING {PACKAGE_COLUMNS}"
        ))
        .bind(i64::from(package.owner_id))
        .bind(package.title)
        .bind(String::from(package.slug))
        .bind(package.description)
        .bind(package.short_description)
        .bind(package.location)
        .bind(package.region)
        .bind(package.category)
        .bind(package.price_cents)
        .bind(package.discounted_price_cents)
        .bind(package.duration_in_days)
        .bind(package.max_group_size)
        .bind(package.coordinates.map(|c| c.latitude))
        .bind(package.coordinates.map(|c| c.longitude))
        .bind(package.status.as_str())
        .bind(package.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Package::try_from(row)
    }

    async fn update(&self, update: PackageUpdate) -> DomainResult<Package> {
        let PackageUpdate {
            id,
            title,
            description,
            short_description,
            location,
            region,
            category,
            price_cents,
            discounted_price_cents,
            duration_in_days,
            max_group_size,
            coordinates,
            status,
            featured,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE packages SET updated_at = ");
        builder.push_bind(updated_at);

        let texts = [
            ("title", title),
            ("description", description),
            ("short_description", short_description),
            ("location", location),
            ("region", region),
            ("category", category),
        ];
        for (column, value) in texts {
            if let Some(value) = value {
                builder.push(format!(", {column} = ")).push_bind(value);
            }
        }
        if let Some(price) = price_cents {
            builder.push(", price_cents = ").push_bind(price);
        }
        if let Some(discounted) = discounted_price_cents {
            builder.push(", discounted_price_cents = ").push_bind(discounted);
        }
        if let Some(days) = duration_in_days {
            builder.push(", duration_in_days = ").push_bind(days);
        }
        if let Some(size) = max_group_size {
            builder.push(", max_group_size = ").push_bind(size);
        }
        if let Some(coordinates) = coordinates {
            builder
                .push(", latitude = ")
                .push_bind(coordinates.map(|c| c.latitude))
                .push(", longitude = ")
                .push_bind(coordinates.map(|c| c.longitude));
        }
        if let Some(status) = status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(featured) = featured {
            builder.push(", featured = ").push_bind(featured);
        }

        builder.push(" WHERE id = ").push_bind(i64::from(id));
        builder.push(format!(" RETURNING {PACKAGE_COLUMNS}"));

        let row = builder
            .build_query_as::<PackageRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("package {id} not found")))?;

        Package::try_from(row)
    }

    async fn delete(&self, id: PackageId) -> DomainResult<()> {
        super::delete_with_dependents(&self.pool, "packages", "package", id.into()).await
    }

    async fn find_by_id(&self, id: PackageId) -> DomainResult<Option<Package>> {
        let row = sqlx::query_as::<_, PackageRow>(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Package::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Package>> {
        let row = sqlx::query_as::<_, PackageRow>(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Package::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: PackageFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Package>, Option<ListCursor>)> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {PACKAGE_COLUMNS} FROM packages"));
        let mut conditions = Conditions::default();

        match filter.owner {
            Some(owner) => {
                conditions
                    .next(&mut builder)
                    .push("owner_id = ")
                    .push_bind(i64::from(owner));
            }
            None => {
                conditions
                    .next(&mut builder)
                    .push("status = ")
                    .push_bind(PackageStatus::Active.as_str());
            }
        }
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
            &["title", "short_description", "location", "region"],
            filter.search,
        );
        conditions.cursor(&mut builder, cursor);
        order_and_limit(&mut builder, limit);

        let packages = builder
            .build_query_as::<PackageRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Package::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(split_page(packages, limit, |package| {
            ListCursor::new(package.created_at, package.id.into())
        }))
    }

    async fn categories(&self) -> DomainResult<Vec<String>> {
        self.distinct_active("category").await
    }

    async fn regions(&self) -> DomainResult<Vec<String>> {
        self.distinct_active("region").await
    }
}
