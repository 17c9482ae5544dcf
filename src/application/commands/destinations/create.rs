// src/application/commands/destinations/create.rs
use super::{
    DestinationCommandService,
    service::{MAX_LABEL_LEN, MAX_TITLE_LEN},
};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, DestinationDto},
        error::ApplicationResult,
    },
    domain::{
        destination::{DestinationStatus, NewDestination},
        errors::DomainError,
        resource::ResourceKind,
        validation::{Coordinates, required_text},
    },
};
use tracing::info;

pub struct CreateDestinationCommand {
    pub title: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub city: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: Option<DestinationStatus>,
}

impl DestinationCommandService {
    pub async fn create_destination(
        &self,
        actor: &AuthenticatedUser,
        command: CreateDestinationCommand,
    ) -> ApplicationResult<DestinationDto> {
        ensure_capability(actor, "destinations", "create")?;

        let title = required_text("title", command.title, MAX_TITLE_LEN)?;
        let coordinates = Coordinates::new(command.latitude, command.longitude)?;

        let new_destination = NewDestination {
            owner_id: actor.id,
            slug: self.slugs.assign(ResourceKind::Destination, &title, None).await?,
            title,
            description: required_text("description", command.description, usize::MAX)?,
            category: required_text("category", command.category, MAX_LABEL_LEN)?,
            region: required_text("region", command.region, MAX_LABEL_LEN)?,
            city: required_text("city", command.city, MAX_LABEL_LEN)?,
            address: command.address.map(|a| a.trim().to_string()).unwrap_or_default(),
            coordinates,
            status: command.status.unwrap_or_default(),
            created_at: self.clock.now(),
        };

        let destination = match self.destinations.insert(new_destination.clone()).await {
            Err(DomainError::DuplicateSlug) => {
                info!(
                    slug = %new_destination.slug,
                    "destination slug taken at insert, retrying once"
                );
                let slug = self
                    .slugs
                    .assign_disambiguated(ResourceKind::Destination, &new_destination.title, None)
                    .await?;
                self.destinations
                    .insert(NewDestination {
                        slug,
                        ..new_destination
                    })
                    .await?
            }
            other => other?,
        };
        info!(destination_id = %destination.id, slug = %destination.slug, "created destination");

        Ok(destination.into())
    }
}
