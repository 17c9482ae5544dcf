// src/application/commands/businesses/update.rs
use super::{
    BusinessCommandService,
    service::{MAX_LABEL_LEN, MAX_NAME_LEN, contact_email, contact_field},
};
use crate::{
    application::{
        commands::capability::ensure_owner_or_any,
        dto::{AuthenticatedUser, BusinessDto},
        error::ApplicationResult,
    },
    domain::{
        business::BusinessUpdate,
        errors::DomainError,
        resource::ResourceKind,
        validation::{Coordinates, ensure_optional, required_text},
    },
};
use tracing::info;

#[derive(Debug, Default)]
pub struct UpdateBusinessCommand {
    pub id: i64,
    pub name: Option<String>,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Vec<f64>>,
}

impl BusinessCommandService {
    pub async fn update_business(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateBusinessCommand,
    ) -> ApplicationResult<BusinessDto> {
        let business = self.load(command.id).await?;
        ensure_owner_or_any(actor, ResourceKind::Business, "update", business.owner_id)?;

        let text = |field, value: Option<String>, max| {
            ensure_optional(value, |v| required_text(field, v, max))
        };
        let name = text("name", command.name, MAX_NAME_LEN)?;
        let slug = match name.as_deref() {
            Some(new_name) => {
                self.slugs
                    .reassign_on_update(
                        ResourceKind::Business,
                        &business.name,
                        Some(new_name),
                        business.id.into(),
                    )
                    .await?
            }
            None => None,
        };

        let update = BusinessUpdate {
            name,
            slug,
            business_type: text("business_type", command.business_type, MAX_LABEL_LEN)?,
            description: text("description", command.description, usize::MAX)?,
            contact_email: ensure_optional(command.contact_email, contact_email)?.map(Some),
            contact_phone: ensure_optional(command.contact_phone, |v| {
                contact_field("contact_phone", v)
            })?
            .map(Some),
            website: ensure_optional(command.website, |v| contact_field("website", v))?.map(Some),
            region: text("region", command.region, MAX_LABEL_LEN)?,
            city: text("city", command.city, MAX_LABEL_LEN)?,
            address: command.address.map(|a| a.trim().to_string()),
            coordinates: command
                .coordinates
                .as_deref()
                .map(Coordinates::from_lon_lat)
                .transpose()?
                .map(Some),
            ..BusinessUpdate::new(business.id, self.clock.now())
        };

        let updated = match self.businesses.update(update.clone()).await {
            Err(DomainError::DuplicateSlug) if update.slug.is_some() => {
                let name = update.name.clone().unwrap_or_else(|| business.name.clone());
                info!(business_id = %business.id, "business slug taken at update, retrying once");
                let slug = self
                    .slugs
                    .assign_disambiguated(ResourceKind::Business, &name, Some(business.id.into()))
                    .await?;
                self.businesses
                    .update(BusinessUpdate {
                        slug: Some(slug),
                        ..update
                    })
                    .await?
            }
            other => other?,
        };

        Ok(updated.into())
    }

    pub async fn delete_business(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<()> {
        let business = self.load(id).await?;
        ensure_owner_or_any(actor, ResourceKind::Business, "delete", business.owner_id)?;
        self.businesses.delete(business.id).await?;
        info!(business_id = %business.id, "deleted business");
        Ok(())
    }
}
