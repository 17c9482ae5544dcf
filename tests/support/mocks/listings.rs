// tests/support/mocks/listings.rs
//! Catalogue stores for packages, destinations and businesses. Slugs and
//! owners live in the shared `Catalog`, so unique-index collisions surface
//! as `DuplicateSlug` the way Postgres reports them.
use super::catalog::Catalog;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use trailhead_core::domain::business::{
    Business, BusinessFilter, BusinessOrder, BusinessRepository, BusinessStatus, BusinessUpdate,
    NewBusiness,
};
use trailhead_core::domain::cursor::ListCursor;
use trailhead_core::domain::derived::ReviewAggregate;
use trailhead_core::domain::destination::{
    Destination, DestinationFilter, DestinationRepository, DestinationStatus, DestinationUpdate,
    NewDestination,
};
use trailhead_core::domain::errors::{DomainError, DomainResult};
use trailhead_core::domain::ids::{BusinessId, DestinationId, PackageId};
use trailhead_core::domain::package::{
    NewPackage, Package, PackageFilter, PackageRepository, PackageStatus, PackageUpdate,
};
use trailhead_core::domain::resource::ResourceKind;
use trailhead_core::domain::slug::Slug;

/// Keyset split used by every in-memory listing: `limit` items plus the
/// cursor of the last one when more remain.
pub fn split<T>(
    mut rows: Vec<T>,
    limit: u32,
    cursor_of: impl Fn(&T) -> ListCursor,
) -> (Vec<T>, Option<ListCursor>) {
    let limit = limit as usize;
    if rows.len() > limit {
        rows.truncate(limit);
        let next = rows.last().map(&cursor_of);
        (rows, next)
    } else {
        (rows, None)
    }
}

fn same_label(value: &str, wanted: Option<&String>) -> bool {
    wanted.is_none_or(|w| value.eq_ignore_ascii_case(w))
}

fn mentions(search: Option<&String>, fields: &[&String]) -> bool {
    search.is_none_or(|q| {
        let q = q.to_lowercase();
        fields.iter().any(|f| f.to_lowercase().contains(&q))
    })
}

fn before(cursor: Option<&ListCursor>, key: (chrono::DateTime<chrono::Utc>, i64)) -> bool {
    cursor.is_none_or(|c| key < (c.created_at, c.id))
}

fn missing(label: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::NotFound(format!("{label} {id} not found"))
}

pub struct InMemoryPackages {
    catalog: Arc<Catalog>,
    packages: Mutex<BTreeMap<i64, Package>>,
}

impl InMemoryPackages {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            packages: Mutex::default(),
        }
    }

    pub fn get(&self, id: i64) -> Option<Package> {
        self.packages.lock().unwrap().get(&id).cloned()
    }

    fn distinct_active(&self, column: impl Fn(&Package) -> &str) -> Vec<String> {
        let values: BTreeSet<String> = self
            .packages
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.status == PackageStatus::Active)
            .map(|p| column(p).to_string())
            .collect();
        values.into_iter().collect()
    }
}

#[async_trait]
impl PackageRepository for InMemoryPackages {
    async fn insert(&self, package: NewPackage) -> DomainResult<Package> {
        let id = self.catalog.next_id();
        self.catalog.claim_slug(ResourceKind::Package, &package.slug, id)?;
        self.catalog.register(ResourceKind::Package, id, package.owner_id);

        let stored = Package {
            id: PackageId(id),
            owner_id: package.owner_id,
            title: package.title,
            slug: package.slug,
            description: package.description,
            short_description: package.short_description,
            location: package.location,
            region: package.region,
            category: package.category,
            price_cents: package.price_cents,
            discounted_price_cents: package.discounted_price_cents,
            duration_in_days: package.duration_in_days,
            max_group_size: package.max_group_size,
            coordinates: package.coordinates,
            status: package.status,
            featured: false,
            reviews: ReviewAggregate::empty(),
            created_at: package.created_at,
            updated_at: package.created_at,
        };
        self.packages.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: PackageUpdate) -> DomainResult<Package> {
        let id = i64::from(update.id);
        let mut packages = self.packages.lock().unwrap();
        let package = packages.get_mut(&id).ok_or_else(|| missing("package", id))?;

        if let Some(title) = update.title {
            package.title = title;
        }
        if let Some(description) = update.description {
            package.description = description;
        }
        if let Some(short_description) = update.short_description {
            package.short_description = short_description;
        }
        if let Some(location) = update.location {
            package.location = location;
        }
        if let Some(region) = update.region {
            package.region = region;
        }
        if let Some(category) = update.category {
            package.category = category;
        }
        if let Some(price_cents) = update.price_cents {
            package.price_cents = price_cents;
        }
        if let Some(discounted) = update.discounted_price_cents {
            package.discounted_price_cents = discounted;
        }
        if let Some(duration) = update.duration_in_days {
            package.duration_in_days = duration;
        }
        if let Some(max_group_size) = update.max_group_size {
            package.max_group_size = max_group_size;
        }
        if let Some(coordinates) = update.coordinates {
            package.coordinates = coordinates;
        }
        if let Some(status) = update.status {
            package.status = status;
        }
        if let Some(featured) = update.featured {
            package.featured = featured;
        }
        package.updated_at = update.updated_at;
        Ok(package.clone())
    }

    async fn delete(&self, id: PackageId) -> DomainResult<()> {
        let id = i64::from(id);
        self.packages
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| missing("package", id))?;
        self.catalog.forget(ResourceKind::Package, id);
        Ok(())
    }

    async fn find_by_id(&self, id: PackageId) -> DomainResult<Option<Package>> {
        Ok(self.get(id.into()))
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Package>> {
        Ok(self
            .packages
            .lock()
            .unwrap()
            .values()
            .find(|p| p.slug == *slug)
            .cloned())
    }

    async fn list_page(
        &self,
        filter: PackageFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Package>, Option<ListCursor>)> {
        let mut matching: Vec<Package> = self
            .packages
            .lock()
            .unwrap()
            .values()
            .filter(|p| match filter.owner {
                Some(owner) => p.owner_id == owner,
                None => p.status == PackageStatus::Active,
            })
            .filter(|p| same_label(&p.category, filter.category.as_ref()))
            .filter(|p| same_label(&p.region, filter.region.as_ref()))
            .filter(|p| !filter.featured_only || p.featured)
            .filter(|p| {
                mentions(
                    filter.search.as_ref(),
                    &[&p.title, &p.description, &p.location, &p.region],
                )
            })
            .filter(|p| before(cursor.as_ref(), (p.created_at, p.id.into())))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(split(matching, limit, |p| ListCursor::new(p.created_at, p.id.into())))
    }

    async fn categories(&self) -> DomainResult<Vec<String>> {
        Ok(self.distinct_active(|p| p.category.as_str()))
    }

    async fn regions(&self) -> DomainResult<Vec<String>> {
        Ok(self.distinct_active(|p| p.region.as_str()))
    }
}

pub struct InMemoryDestinations {
    catalog: Arc<Catalog>,
    destinations: Mutex<BTreeMap<i64, Destination>>,
}

impl InMemoryDestinations {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            destinations: Mutex::default(),
        }
    }

    pub fn get(&self, id: i64) -> Option<Destination> {
        self.destinations.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl DestinationRepository for InMemoryDestinations {
    async fn insert(&self, destination: NewDestination) -> DomainResult<Destination> {
        let id = self.catalog.next_id();
        self.catalog
            .claim_slug(ResourceKind::Destination, &destination.slug, id)?;
        self.catalog
            .register(ResourceKind::Destination, id, destination.owner_id);

        let stored = Destination {
            id: DestinationId(id),
            owner_id: destination.owner_id,
            title: destination.title,
            slug: destination.slug,
            description: destination.description,
            category: destination.category,
            region: destination.region,
            city: destination.city,
            address: destination.address,
            coordinates: destination.coordinates,
            status: destination.status,
            featured: false,
            reviews: ReviewAggregate::empty(),
            created_at: destination.created_at,
            updated_at: destination.created_at,
        };
        self.destinations.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: DestinationUpdate) -> DomainResult<Destination> {
        let id = i64::from(update.id);
        let mut destinations = self.destinations.lock().unwrap();
        let destination = destinations
            .get_mut(&id)
            .ok_or_else(|| missing("destination", id))?;

        if let Some(title) = update.title {
            destination.title = title;
        }
        if let Some(description) = update.description {
            destination.description = description;
        }
        if let Some(category) = update.category {
            destination.category = category;
        }
        if let Some(region) = update.region {
            destination.region = region;
        }
        if let Some(city) = update.city {
            destination.city = city;
        }
        if let Some(address) = update.address {
            destination.address = address;
        }
        if let Some(coordinates) = update.coordinates {
            destination.coordinates = coordinates;
        }
        if let Some(status) = update.status {
            destination.status = status;
        }
        if let Some(featured) = update.featured {
            destination.featured = featured;
        }
        destination.updated_at = update.updated_at;
        Ok(destination.clone())
    }

    async fn delete(&self, id: DestinationId) -> DomainResult<()> {
        let id = i64::from(id);
        self.destinations
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| missing("destination", id))?;
        self.catalog.forget(ResourceKind::Destination, id);
        Ok(())
    }

    async fn find_by_id(&self, id: DestinationId) -> DomainResult<Option<Destination>> {
        Ok(self.get(id.into()))
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Destination>> {
        Ok(self
            .destinations
            .lock()
            .unwrap()
            .values()
            .find(|d| d.slug == *slug)
            .cloned())
    }

    async fn list_page(
        &self,
        filter: DestinationFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Destination>, Option<ListCursor>)> {
        let mut matching: Vec<Destination> = self
            .destinations
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.status == DestinationStatus::Published)
            .filter(|d| same_label(&d.category, filter.category.as_ref()))
            .filter(|d| same_label(&d.region, filter.region.as_ref()))
            .filter(|d| !filter.featured_only || d.featured)
            .filter(|d| {
                mentions(
                    filter.search.as_ref(),
                    &[&d.title, &d.description, &d.city, &d.region],
                )
            })
            .filter(|d| before(cursor.as_ref(), (d.created_at, d.id.into())))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(split(matching, limit, |d| ListCursor::new(d.created_at, d.id.into())))
    }
}

pub struct InMemoryBusinesses {
    catalog: Arc<Catalog>,
    businesses: Mutex<BTreeMap<i64, Business>>,
}

impl InMemoryBusinesses {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            businesses: Mutex::default(),
        }
    }

    pub fn get(&self, id: i64) -> Option<Business> {
        self.businesses.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl BusinessRepository for InMemoryBusinesses {
    async fn insert(&self, business: NewBusiness) -> DomainResult<Business> {
        let id = self.catalog.next_id();
        self.catalog
            .claim_slug(ResourceKind::Business, &business.slug, id)?;
        self.catalog
            .register(ResourceKind::Business, id, business.owner_id);

        let stored = Business {
            id: BusinessId(id),
            owner_id: business.owner_id,
            name: business.name,
            slug: business.slug,
            business_type: business.business_type,
            description: business.description,
            contact_email: business.contact_email,
            contact_phone: business.contact_phone,
            website: business.website,
            region: business.region,
            city: business.city,
            address: business.address,
            coordinates: business.coordinates,
            status: business.status,
            is_verified: false,
            verification_date: None,
            featured: false,
            reviews: ReviewAggregate::empty(),
            created_at: business.created_at,
            updated_at: business.created_at,
        };
        self.businesses.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: BusinessUpdate) -> DomainResult<Business> {
        let id = i64::from(update.id);
        let mut businesses = self.businesses.lock().unwrap();
        let business = businesses
            .get_mut(&id)
            .ok_or_else(|| missing("business", id))?;

        if let Some(slug) = update.slug {
            self.catalog.claim_slug(ResourceKind::Business, &slug, id)?;
            business.slug = slug;
        }
        if let Some(name) = update.name {
            business.name = name;
        }
        if let Some(business_type) = update.business_type {
            business.business_type = business_type;
        }
        if let Some(description) = update.description {
            business.description = description;
        }
        if let Some(contact_email) = update.contact_email {
            business.contact_email = contact_email;
        }
        if let Some(contact_phone) = update.contact_phone {
            business.contact_phone = contact_phone;
        }
        if let Some(website) = update.website {
            business.website = website;
        }
        if let Some(region) = update.region {
            business.region = region;
        }
        if let Some(city) = update.city {
            business.city = city;
        }
        if let Some(address) = update.address {
            business.address = address;
        }
        if let Some(coordinates) = update.coordinates {
            business.coordinates = coordinates;
        }
        if let Some(status) = update.status {
            business.status = status;
        }
        if let Some(verified_at) = update.verification_date {
            business.is_verified = true;
            business.verification_date = Some(verified_at);
        }
        if let Some(featured) = update.featured {
            business.featured = featured;
        }
        business.updated_at = update.updated_at;
        Ok(business.clone())
    }

    async fn delete(&self, id: BusinessId) -> DomainResult<()> {
        let id = i64::from(id);
        self.businesses
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| missing("business", id))?;
        self.catalog.forget(ResourceKind::Business, id);
        Ok(())
    }

    async fn find_by_id(&self, id: BusinessId) -> DomainResult<Option<Business>> {
        Ok(self.get(id.into()))
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Business>> {
        Ok(self
            .businesses
            .lock()
            .unwrap()
            .values()
            .find(|b| b.slug == *slug)
            .cloned())
    }

    async fn list_page(
        &self,
        filter: BusinessFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Business>, Option<ListCursor>)> {
        let by_rating = filter.order == BusinessOrder::Rating;
        let mut matching: Vec<Business> = self
            .businesses
            .lock()
            .unwrap()
            .values()
            .filter(|b| match filter.owner {
                Some(owner) => b.owner_id == owner,
                None => b.status == BusinessStatus::Active,
            })
            .filter(|b| same_label(&b.business_type, filter.business_type.as_ref()))
            .filter(|b| same_label(&b.region, filter.region.as_ref()))
            .filter(|b| same_label(&b.city, filter.city.as_ref()))
            .filter(|b| !filter.featured_only || b.featured)
            .filter(|b| mentions(filter.search.as_ref(), &[&b.name, &b.description, &b.city]))
            .filter(|b| by_rating || before(cursor.as_ref(), (b.created_at, b.id.into())))
            .cloned()
            .collect();

        if by_rating {
            matching.sort_by(|a, b| {
                let rating = |x: &Business| x.reviews.rating.unwrap_or(f64::NEG_INFINITY);
                rating(b)
                    .total_cmp(&rating(a))
                    .then(b.reviews.review_count.cmp(&a.reviews.review_count))
                    .then(b.id.cmp(&a.id))
            });
            matching.truncate(limit as usize);
            return Ok((matching, None));
        }
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(split(matching, limit, |b| ListCursor::new(b.created_at, b.id.into())))
    }
}
