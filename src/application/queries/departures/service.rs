// src/application/queries/departures/service.rs
use std::sync::Arc;

use crate::application::{
    dto::{AuthenticatedUser, DepartureDto},
    error::{ApplicationError, ApplicationResult},
    ports::time::Clock,
};
use crate::domain::{
    departure::DepartureRepository,
    ids::{DepartureId, PackageId},
    resource::{RecordLookup, ResourceKind},
};

pub struct DepartureQueryService {
    departures: Arc<dyn DepartureRepository>,
    records: Arc<dyn RecordLookup>,
    clock: Arc<dyn Clock>,
}

impl DepartureQueryService {
    pub fn new(
        departures: Arc<dyn DepartureRepository>,
        records: Arc<dyn RecordLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            departures,
            records,
            clock,
        }
    }

    /// Departures of a package that have not left yet, earliest first.
    pub async fn upcoming_for_package(
        &self,
        package_id: i64,
    ) -> ApplicationResult<Vec<DepartureDto>> {
        let package_id = PackageId::new(package_id)?;
        if self
            .records
            .owner_of(ResourceKind::Package, package_id.into())
            .await?
            .is_none()
        {
            return Err(ApplicationError::missing("package", package_id));
        }
        let departures = self
            .departures
            .list_for_package(package_id, Some(self.clock.now()))
            .await?;
        Ok(departures.into_iter().map(DepartureDto::from).collect())
    }

    /// Every departure across the actor's packages, past ones included.
    pub async fn my_departures(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<DepartureDto>> {
        let departures = self.departures.list_for_owner(actor.id).await?;
        Ok(departures.into_iter().map(DepartureDto::from).collect())
    }

    pub async fn get_departure(&self, id: i64) -> ApplicationResult<DepartureDto> {
        let id = DepartureId::new(id)?;
        self.departures
            .find_by_id(id)
            .await?
            .map(DepartureDto::from)
            .ok_or_else(|| ApplicationError::missing("departure", id))
    }
}
