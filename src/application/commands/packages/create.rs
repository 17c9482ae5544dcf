// src/application/commands/packages/create.rs
use super::{
    PackageCommandService,
    service::{MAX_LABEL_LEN, MAX_SHORT_DESCRIPTION_LEN, MAX_TITLE_LEN},
};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, PackageDto},
        error::ApplicationResult,
    },
    domain::{
        errors::DomainError,
        package::{NewPackage, PackageStatus, entity::ensure_discount},
        resource::ResourceKind,
        validation::{
            Coordinates, ensure_non_negative, ensure_optional, ensure_positive, required_text,
        },
    },
};
use tracing::info;

pub struct CreatePackageCommand {
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub location: String,
    pub region: String,
    pub category: String,
    pub price_cents: i64,
    pub discounted_price_cents: Option<i64>,
    pub duration_in_days: i32,
    pub max_group_size: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<PackageStatus>,
}

impl PackageCommandService {
    pub async fn create_package(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePackageCommand,
    ) -> ApplicationResult<PackageDto> {
        ensure_capability(actor, "packages", "create")?;

        let title = required_text("title", command.title, MAX_TITLE_LEN)?;
        let description = required_text("description", command.description, usize::MAX)?;
        let short_description = match command.short_description {
            Some(text) => required_text("short_description", text, MAX_SHORT_DESCRIPTION_LEN)?,
            None => description.chars().take(MAX_SHORT_DESCRIPTION_LEN).collect(),
        };
        let price_cents = ensure_non_negative("price_cents", command.price_cents)?;
        let discounted_price_cents = ensure_optional(command.discounted_price_cents, |v| {
            ensure_non_negative("discounted_price_cents", v)
        })?;
        ensure_discount(price_cents, discounted_price_cents)?;
        let coordinates = Coordinates::from_parts(command.latitude, command.longitude)?;

        let new_package = NewPackage {
            owner_id: actor.id,
            slug: self.slugs.assign(ResourceKind::Package, &title, None).await?,
            title,
            description,
            short_description,
            location: required_text("location", command.location, MAX_LABEL_LEN)?,
            region: required_text("region", command.region, MAX_LABEL_LEN)?,
            category: required_text("category", command.category, MAX_LABEL_LEN)?,
            price_cents,
            discounted_price_cents,
            duration_in_days: ensure_positive("duration_in_days", command.duration_in_days)?,
            max_group_size: ensure_optional(command.max_group_size, |v| {
                ensure_positive("max_group_size", v)
            })?,
            coordinates,
            status: command.status.unwrap_or_default(),
            created_at: self.clock.now(),
        };

        let package = match self.packages.insert(new_package.clone()).await {
            Err(DomainError::DuplicateSlug) => {
                info!(slug = %new_package.slug, "package slug taken at insert, retrying once");
                let slug = self
                    .slugs
                    .assign_disambiguated(ResourceKind::Package, &new_package.title, None)
                    .await?;
                self.packages.insert(NewPackage { slug, ..new_package }).await?
            }
            other => other?,
        };
        info!(package_id = %package.id, slug = %package.slug, "created package");

        Ok(package.into())
    }
}
