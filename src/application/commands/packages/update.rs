// src/application/commands/packages/update.rs
use super::{
    PackageCommandService,
    service::{MAX_LABEL_LEN, MAX_SHORT_DESCRIPTION_LEN, MAX_TITLE_LEN},
};
use crate::{
    application::{
        commands::capability::ensure_owner_or_any,
        dto::{AuthenticatedUser, PackageDto},
        error::ApplicationResult,
    },
    domain::{
        package::{PackageStatus, PackageUpdate, entity::ensure_discount},
        resource::ResourceKind,
        validation::{
            Coordinates, ensure_non_negative, ensure_optional, ensure_positive, required_text,
        },
    },
};

/// Partial update; the slug is immutable for packages.
#[derive(Debug, Default)]
pub struct UpdatePackageCommand {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub discounted_price_cents: Option<i64>,
    pub duration_in_days: Option<i32>,
    pub max_group_size: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<PackageStatus>,
}

impl PackageCommandService {
    pub async fn update_package(
        &self,
        actor: &AuthenticatedUser,
        command: UpdatePackageCommand,
    ) -> ApplicationResult<PackageDto> {
        let package = self.load(command.id).await?;
        ensure_owner_or_any(actor, ResourceKind::Package, "update", package.owner_id)?;

        let price =
            ensure_optional(command.price_cents, |v| ensure_non_negative("price_cents", v))?;
        let discount = ensure_optional(command.discounted_price_cents, |v| {
            ensure_non_negative("discounted_price_cents", v)
        })?;
        ensure_discount(
            price.unwrap_or(package.price_cents),
            discount.or(package.discounted_price_cents),
        )?;

        let text = |field, value: Option<String>, max| {
            ensure_optional(value, |v| required_text(field, v, max))
        };

        let update = PackageUpdate {
            title: text("title", command.title, MAX_TITLE_LEN)?,
            description: text("description", command.description, usize::MAX)?,
            short_description: text(
                "short_description",
                command.short_description,
                MAX_SHORT_DESCRIPTION_LEN,
            )?,
            location: text("location", command.location, MAX_LABEL_LEN)?,
            region: text("region", command.region, MAX_LABEL_LEN)?,
            category: text("category", command.category, MAX_LABEL_LEN)?,
            price_cents: price,
            discounted_price_cents: discount.map(Some),
            duration_in_days: ensure_optional(command.duration_in_days, |v| {
                ensure_positive("duration_in_days", v)
            })?,
            max_group_size: ensure_optional(command.max_group_size, |v| {
                ensure_positive("max_group_size", v)
            })?
            .map(Some),
            coordinates: Coordinates::from_parts(command.latitude, command.longitude)?.map(Some),
            status: command.status,
            ..PackageUpdate::new(package.id, self.clock.now())
        };

        Ok(self.packages.update(update).await?.into())
    }
}
