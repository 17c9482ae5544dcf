// src/infrastructure/repositories/postgres_business.rs
use super::{
    map_sqlx,
    support::{Conditions, MAX_PAGE, aggregate, coordinates, order_and_limit, split_page},
};
use crate::domain::business::{
    Business, BusinessFilter, BusinessOrder, BusinessRepository, BusinessStatus, BusinessUpdate,
    NewBusiness,
};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::BusinessId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const BUSINESS_COLUMNS: &str = "id, owner_id, name, slug, business_type, description, \
     contact_email, contact_phone, website, region, city, address, latitude, longitude, status, \
     is_verified, verification_date, featured, rating, review_count, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresBusinessRepository {
    pool: PgPool,
}

impl PostgresBusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BusinessRow {
    id: i64,
    owner_id: i64,
    name: String,
    slug: String,
    business_type: String,
    description: String,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    website: Option<String>,
    region: String,
    city: String,
    address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    status: String,
    is_verified: bool,
    verification_date: Option<DateTime<Utc>>,
    featured: bool,
    rating: Option<f64>,
    review_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BusinessRow> for Business {
    type Error = DomainError;

    fn try_from(row: BusinessRow) -> Result<Self, Self::Error> {
        Ok(Business {
            id: BusinessId::new(row.id)?,
            owner_id: UserId::new(row.owner_id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
            business_type: row.business_type,
            description: row.description,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            website: row.website,
            region: row.region,
            city: row.city,
            address: row.address,
            coordinates: coordinates(row.latitude, row.longitude)?,
            status: row.status.parse()?,
            is_verified: row.is_verified,
            verification_date: row.verification_date,
            featured: row.featured,
            reviews: aggregate(row.rating, row.review_count),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BusinessRepository for PostgresBusinessRepository {
    async fn insert(&self, business: NewBusiness) -> DomainResult<Business> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "INSERT INTO businesses (owner_id, name, slug, business_type, description,
                 contact_email, contact_phone, website, region, city, address, latitude,
                 longitude, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
             RETURNING {BUSINESS_COLUMNS}"
        ))
        .bind(i64::from(business.owner_id))
        .bind(business.name)
        .bind(String::from(business.slug))
        .bind(business.business_type)
        .bind(business.description)
        .bind(business.contact_email)
        .bind(business.contact_phone)
        .bind(business.website)
        .bind(business.region)
        .bind(business.city)
        .bind(business.address)
        .bind(business.coordinates.map(|c| c.latitude))
        .bind(business.coordinates.map(|c| c.longitude))
        .bind(business.status.as_str())
        .bind(business.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Business::try_from(row)
    }

    async fn update(&self, update: BusinessUpdate) -> DomainResult<Business> {
        let BusinessUpdate {
            id,
            name,
            slug,
            business_type,
            description,
            contact_email,
            contact_phone,
            website,
            region,
            city,
            address,
            coordinates,
            status,
            verification_date,
            featured,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE businesses SET updated_at = ");
        builder.push_bind(updated_at);

        let texts = [
            ("name", name),
            ("slug", slug.map(String::from)),
            ("business_type", business_type),
            ("description", description),
            ("region", region),
            ("city", city),
            ("address", address),
        ];
        for (column, value) in texts {
            if let Some(value) = value {
                builder.push(format!(", {column} = ")).push_bind(value);
            }
        }
        let contacts = [
            ("contact_email", contact_email),
            ("contact_phone", contact_phone),
            ("website", website),
        ];
        for (column, value) in contacts {
            if let Some(value) = value {
                builder.push(format!(", {column} = ")).push_bind(value);
            }
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
        if let Some(verified_at) = verification_date {
            builder
                .push(", is_verified = TRUE, verification_date = ")
                .push_bind(verified_at);
        }
        if let Some(featured) = featured {
            builder.push(", featured = ").push_bind(featured);
        }

        builder.push(" WHERE id = ").push_bind(i64::from(id));
        builder.push(format!(" RETURNING {BUSINESS_COLUMNS}"));

        let row = builder
            .build_query_as::<BusinessRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("business {id} not found")))?;

        Business::try_from(row)
    }

    async fn delete(&self, id: BusinessId) -> DomainResult<()> {
        super::delete_with_dependents(&self.pool, "businesses", "business", id.into()).await
    }

    async fn find_by_id(&self, id: BusinessId) -> DomainResult<Option<Business>> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Business::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Business>> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Business::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: BusinessFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Business>, Option<ListCursor>)> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {BUSINESS_COLUMNS} FROM businesses"));
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
                    .push_bind(BusinessStatus::Active.as_str());
            }
        }
        let exact = [
            ("business_type", filter.business_type),
            ("region", filter.region),
            ("city", filter.city),
        ];
        for (column, value) in exact {
            if let Some(value) = value {
                conditions
                    .next(&mut builder)
                    .push(format!("{column} ILIKE "))
                    .push_bind(value);
            }
        }
        if filter.featured_only {
            conditions.next(&mut builder).push("featured = TRUE");
        }
        conditions.search(&mut builder, &["name", "description", "city"], filter.search);

        if filter.order == BusinessOrder::Rating {
            builder.push(" ORDER BY rating DESC NULLS LAST, review_count DESC, id DESC LIMIT ");
            builder.push_bind(i64::from(limit.clamp(1, MAX_PAGE)));
            let businesses = builder
                .build_query_as::<BusinessRow>()
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?
                .into_iter()
                .map(Business::try_from)
                .collect::<DomainResult<Vec<_>>>()?;
            return Ok((businesses, None));
        }

        conditions.cursor(&mut builder, cursor);
        order_and_limit(&mut builder, limit);

        let businesses = builder
            .build_query_as::<BusinessRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Business::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(split_page(businesses, limit, |business| {
            ListCursor::new(business.created_at, business.id.into())
        }))
    }
}
