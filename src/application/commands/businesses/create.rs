// src/application/commands/businesses/create.rs
use super::{
    BusinessCommandService,
    service::{MAX_LABEL_LEN, MAX_NAME_LEN, contact_email, contact_field},
};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, BusinessDto},
        error::ApplicationResult,
    },
    domain::{
        business::{BusinessStatus, NewBusiness},
        errors::DomainError,
        resource::ResourceKind,
        validation::{Coordinates, ensure_optional, required_text},
    },
};
use tracing::info;

pub struct CreateBusinessCommand {
    pub name: String,
    pub business_type: String,
    pub description: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub region: String,
    pub city: String,
    pub address: Option<String>,
    /// `[longitude, latitude]`.
    pub coordinates: Option<Vec<f64>>,
}

impl BusinessCommandService {
    pub async fn create_business(
        &self,
        actor: &AuthenticatedUser,
        command: CreateBusinessCommand,
    ) -> ApplicationResult<BusinessDto> {
        ensure_capability(actor, "businesses", "create")?;

        let name = required_text("name", command.name, MAX_NAME_LEN)?;
        let coordinates = command
            .coordinates
            .as_deref()
            .map(Coordinates::from_lon_lat)
            .transpose()?;

        let new_business = NewBusiness {
            owner_id: actor.id,
            slug: self.slugs.assign(ResourceKind::Business, &name, None).await?,
            name,
            business_type: required_text("business_type", command.business_type, MAX_LABEL_LEN)?,
            description: required_text("description", command.description, usize::MAX)?,
            contact_email: ensure_optional(command.contact_email, contact_email)?,
            contact_phone: ensure_optional(command.contact_phone, |v| {
                contact_field("contact_phone", v)
            })?,
            website: ensure_optional(command.website, |v| contact_field("website", v))?,
            region: required_text("region", command.region, MAX_LABEL_LEN)?,
            city: required_text("city", command.city, MAX_LABEL_LEN)?,
            address: command.address.map(|a| a.trim().to_string()).unwrap_or_default(),
            coordinates,
            status: BusinessStatus::default(),
            created_at: self.clock.now(),
        };

        let business = match self.businesses.insert(new_business.clone()).await {
            Err(DomainError::DuplicateSlug) => {
                info!(slug = %new_business.slug, "business slug taken at insert, retrying once");
                let slug = self
                    .slugs
                    .assign_disambiguated(ResourceKind::Business, &new_business.name, None)
                    .await?;
                self.businesses
                    .insert(NewBusiness {
                        slug,
                        ..new_business
                    })
                    .await?
            }
            other => other?,
        };
        info!(business_id = %business.id, slug = %business.slug, "created business");

        Ok(business.into())
    }
}
