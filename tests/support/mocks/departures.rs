// tests/support/mocks/departures.rs
use super::catalog::Catalog;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use trailhead_core::domain::departure::{
    Departure, DepartureRepository, DepartureUpdate, NewDeparture,
};
use trailhead_core::domain::errors::{DomainError, DomainResult};
use trailhead_core::domain::ids::{DepartureId, PackageId};
use trailhead_core::domain::resource::ResourceKind;
use trailhead_core::domain::user::UserId;

/// Departure rows shared with the booking store, which takes and returns
/// slots while holding this lock.
pub type DepartureTable = Arc<Mutex<BTreeMap<i64, Departure>>>;

pub struct InMemoryDepartures {
    catalog: Arc<Catalog>,
    departures: DepartureTable,
}

impl InMemoryDepartures {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            departures: Arc::default(),
        }
    }

    pub fn table(&self) -> DepartureTable {
        Arc::clone(&self.departures)
    }

    pub fn get(&self, id: i64) -> Option<Departure> {
        self.departures.lock().unwrap().get(&id).cloned()
    }
}

fn sorted(mut rows: Vec<Departure>) -> Vec<Departure> {
    rows.sort_by_key(|d| (d.start_date, d.id));
    rows
}

#[async_trait]
impl DepartureRepository for InMemoryDepartures {
    async fn insert(&self, departure: NewDeparture) -> DomainResult<Departure> {
        let id = self.catalog.next_id();
        let stored = Departure {
            id: DepartureId(id),
            package_id: departure.package_id,
            start_date: departure.start_date,
            end_date: departure.end_date,
            price_cents: departure.price_cents,
            total_slots: departure.total_slots,
            available_slots: departure.total_slots,
            is_guaranteed: departure.is_guaranteed,
            created_at: departure.created_at,
            updated_at: departure.created_at,
        };
        self.departures.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: DepartureUpdate) -> DomainResult<Departure> {
        let id = i64::from(update.id);
        let mut departures = self.departures.lock().unwrap();
        let departure = departures
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("departure {id} not found")))?;

        if let Some(total) = update.total_slots {
            departure.available_slots = departure.resize(total)?;
            departure.total_slots = total;
        }
        if let Some(start_date) = update.start_date {
            departure.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            departure.end_date = end_date;
        }
        if let Some(price_cents) = update.price_cents {
            departure.price_cents = price_cents;
        }
        if let Some(guaranteed) = update.is_guaranteed {
            departure.is_guaranteed = guaranteed;
        }
        departure.updated_at = update.updated_at;
        Ok(departure.clone())
    }

    async fn delete(&self, id: DepartureId) -> DomainResult<()> {
        let id = i64::from(id);
        let mut departures = self.departures.lock().unwrap();
        departures
            .get(&id)
            .ok_or_else(|| DomainError::NotFound(format!("departure {id} not found")))?
            .ensure_unreserved()?;
        departures.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: DepartureId) -> DomainResult<Option<Departure>> {
        Ok(self.get(id.into()))
    }

    async fn list_for_package(
        &self,
        package_id: PackageId,
        from: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<Departure>> {
        let departures = self.departures.lock().unwrap();
        Ok(sorted(
            departures
                .values()
                .filter(|d| d.package_id == package_id)
                .filter(|d| from.is_none_or(|from| d.start_date > from))
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_owner(&self, owner: UserId) -> DomainResult<Vec<Departure>> {
        let departures = self.departures.lock().unwrap();
        Ok(sorted(
            departures
                .values()
                .filter(|d| {
                    self.catalog.owner(ResourceKind::Package, d.package_id.into()) == Some(owner)
                })
                .cloned()
                .collect(),
        ))
    }
}
