// src/domain/departure/repository.rs
use crate::domain::departure::entity::{Departure, DepartureUpdate, NewDeparture};
use crate::domain::errors::DomainResult;
use crate::domain::ids::{DepartureId, PackageId};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait DepartureRepository: Send + Sync {
    /// Starts with every slot available.
    async fn insert(&self, departure: NewDeparture) -> DomainResult<Departure>;
    /// Locks the row; a `total_slots` change goes through
    /// `Departure::resize` against the locked reservation count.
    async fn update(&self, update: DepartureUpdate) -> DomainResult<Departure>;
    /// `Conflict` while bookings hold slots on it.
    async fn delete(&self, id: DepartureId) -> DomainResult<()>;
    async fn find_by_id(&self, id: DepartureId) -> DomainResult<Option<Departure>>;
    /// Departures of one package starting after `from` when given, earliest
    /// first.
    async fn list_for_package(
        &self,
        package_id: PackageId,
        from: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<Departure>>;
    /// Departures of every package `owner` owns, earliest first.
    async fn list_for_owner(&self, owner: UserId) -> DomainResult<Vec<Departure>>;
}
