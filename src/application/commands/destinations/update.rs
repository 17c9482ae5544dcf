// src/application/commands/destinations/update.rs
use super::{
    DestinationCommandService,
    service::{MAX_LABEL_LEN, MAX_TITLE_LEN},
};
use crate::{
    application::{
        commands::capability::{ensure_can_feature, ensure_owner_or_any},
        dto::{AuthenticatedUser, DestinationDto},
        error::ApplicationResult,
    },
    domain::{
        destination::{DestinationStatus, DestinationUpdate},
        resource::ResourceKind,
        validation::{Coordinates, ensure_optional, required_text},
    },
};
use tracing::info;

#[derive(Debug, Default)]
pub struct UpdateDestinationCommand {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<DestinationStatus>,
}

impl DestinationCommandService {
    pub async fn update_destination(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateDestinationCommand,
    ) -> ApplicationResult<DestinationDto> {
        let destination = self.load(command.id).await?;
        ensure_owner_or_any(actor, ResourceKind::Destination, "update", destination.owner_id)?;

        let text = |field, value: Option<String>, max| {
            ensure_optional(value, |v| required_text(field, v, max))
        };

        let update = DestinationUpdate {
            title: text("title", command.title, MAX_TITLE_LEN)?,
            description: text("description", command.description, usize::MAX)?,
            category: text("category", command.category, MAX_LABEL_LEN)?,
            region: text("region", command.region, MAX_LABEL_LEN)?,
            city: text("city", command.city, MAX_LABEL_LEN)?,
            address: command.address.map(|a| a.trim().to_string()),
            coordinates: Coordinates::from_parts(command.latitude, command.longitude)?,
            status: command.status,
            ..DestinationUpdate::new(destination.id, self.clock.now())
        };

        Ok(self.destinations.update(update).await?.into())
    }

    pub async fn delete_destination(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<()> {
        let destination = self.load(id).await?;
        ensure_owner_or_any(actor, ResourceKind::Destination, "delete", destination.owner_id)?;
        self.destinations.delete(destination.id).await?;
        info!(destination_id = %destination.id, "deleted destination");
        Ok(())
    }

    pub async fn toggle_featured(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<DestinationDto> {
        let destination = self.load(id).await?;
        ensure_can_feature(actor, ResourceKind::Destination, destination.owner_id)?;

        let update = DestinationUpdate {
            featured: Some(!destination.featured),
            ..DestinationUpdate::new(destination.id, self.clock.now())
        };
        Ok(self.destinations.update(update).await?.into())
    }
}
