// src/application/commands/departures/service.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::capability::ensure_owner_or_any,
        dto::{AuthenticatedUser, DepartureDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        departure::{
            Departure, DepartureRepository, DepartureUpdate, NewDeparture, entity::MAX_SLOTS,
        },
        errors::DomainError,
        ids::{DepartureId, PackageId},
        resource::{RecordLookup, ResourceKind},
        validation::{ensure_date_order, ensure_in_range, ensure_non_negative, ensure_optional},
    },
};
use chrono::{DateTime, Utc};
use tracing::info;

pub struct CreateDepartureCommand {
    pub package_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price_cents: i64,
    pub total_slots: i32,
    pub is_guaranteed: bool,
}

#[derive(Debug, Default)]
pub struct UpdateDepartureCommand {
    pub id: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub total_slots: Option<i32>,
    pub is_guaranteed: Option<bool>,
}

/// Departures are managed by whoever may update the package.
pub struct DepartureCommandService {
    departures: Arc<dyn DepartureRepository>,
    records: Arc<dyn RecordLookup>,
    clock: Arc<dyn Clock>,
}

impl DepartureCommandService {
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

    pub async fn create_departure(
        &self,
        actor: &AuthenticatedUser,
        command: CreateDepartureCommand,
    ) -> ApplicationResult<DepartureDto> {
        let package_id = PackageId::new(command.package_id)?;
        self.authorize(actor, package_id).await?;

        ensure_date_order(command.start_date, command.end_date)?;
        self.ensure_future(command.start_date)?;
        let departure = self
            .departures
            .insert(NewDeparture {
                package_id,
                start_date: command.start_date,
                end_date: command.end_date,
                price_cents: ensure_non_negative("price_cents", command.price_cents)?,
                total_slots: ensure_in_range("total_slots", command.total_slots, 1, MAX_SLOTS)?,
                is_guaranteed: command.is_guaranteed,
                created_at: self.clock.now(),
            })
            .await?;
        info!(
            departure_id = %departure.id,
            package_id = %departure.package_id,
            slots = departure.total_slots,
            "scheduled departure"
        );

        Ok(departure.into())
    }

    /// Shrinking `total_slots` below the seats already reserved is a
    /// `Conflict`.
    pub async fn update_departure(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateDepartureCommand,
    ) -> ApplicationResult<DepartureDto> {
        let departure = self.load(command.id).await?;
        self.authorize(actor, departure.package_id).await?;

        ensure_date_order(
            command.start_date.unwrap_or(departure.start_date),
            command.end_date.unwrap_or(departure.end_date),
        )?;
        if let Some(start) = command.start_date {
            self.ensure_future(start)?;
        }

        let update = DepartureUpdate {
            start_date: command.start_date,
            end_date: command.end_date,
            price_cents: ensure_optional(command.price_cents, |v| {
                ensure_non_negative("price_cents", v)
            })?,
            total_slots: ensure_optional(command.total_slots, |v| {
                ensure_in_range("total_slots", v, 1, MAX_SLOTS)
            })?,
            is_guaranteed: command.is_guaranteed,
            ..DepartureUpdate::new(departure.id, self.clock.now())
        };
        Ok(self.departures.update(update).await?.into())
    }

    pub async fn delete_departure(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<()> {
        let departure = self.load(id).await?;
        self.authorize(actor, departure.package_id).await?;
        self.departures.delete(departure.id).await?;
        info!(departure_id = %departure.id, "deleted departure");
        Ok(())
    }

    async fn authorize(
        &self,
        actor: &AuthenticatedUser,
        package_id: PackageId,
    ) -> ApplicationResult<()> {
        let owner = self
            .records
            .owner_of(ResourceKind::Package, package_id.into())
            .await?
            .ok_or_else(|| ApplicationError::missing("package", package_id))?;
        ensure_owner_or_any(actor, ResourceKind::Package, "update", owner)
    }

    fn ensure_future(&self, start: DateTime<Utc>) -> ApplicationResult<()> {
        if start <= self.clock.now() {
            return Err(
                DomainError::invalid("start_date", "departure must start in the future").into(),
            );
        }
        Ok(())
    }

    async fn load(&self, id: i64) -> ApplicationResult<Departure> {
        let id = DepartureId::new(id)?;
        self.departures
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("departure", id))
    }
}
