// src/application/commands/packages/delete.rs
use super::PackageCommandService;
use crate::{
    application::{
        commands::capability::ensure_owner_or_any, dto::AuthenticatedUser,
        error::ApplicationResult,
    },
    domain::resource::ResourceKind,
};
use tracing::info;

impl PackageCommandService {
    pub async fn delete_package(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<()> {
        let package = self.load(id).await?;
        ensure_owner_or_any(actor, ResourceKind::Package, "delete", package.owner_id)?;
        self.packages.delete(package.id).await?;
        info!(package_id = %package.id, "deleted package");
        Ok(())
    }
}
