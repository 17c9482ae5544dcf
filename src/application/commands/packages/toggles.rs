// src/application/commands/packages/toggles.rs
use super::PackageCommandService;
use crate::{
    application::{
        commands::capability::{ensure_can_feature, ensure_owner_or_any},
        dto::{AuthenticatedUser, PackageDto},
        error::ApplicationResult,
    },
    domain::{package::PackageUpdate, resource::ResourceKind},
};

impl PackageCommandService {
    pub async fn toggle_featured(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<PackageDto> {
        let package = self.load(id).await?;
        ensure_can_feature(actor, ResourceKind::Package, package.owner_id)?;

        let update = PackageUpdate {
            featured: Some(!package.featured),
            ..PackageUpdate::new(package.id, self.clock.now())
        };
        Ok(self.packages.update(update).await?.into())
    }

    /// Draft and active flip into each other.
    pub async fn toggle_status(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<PackageDto> {
        let package = self.load(id).await?;
        ensure_owner_or_any(actor, ResourceKind::Package, "update", package.owner_id)?;

        let update = PackageUpdate {
            status: Some(package.status.toggled()),
            ..PackageUpdate::new(package.id, self.clock.now())
        };
        Ok(self.packages.update(update).await?.into())
    }
}
