// src/application/commands/businesses/moderation.rs
use super::BusinessCommandService;
use crate::{
    application::{
        commands::capability::{ensure_can_feature, ensure_capability},
        dto::{AuthenticatedUser, BusinessDto},
        error::ApplicationResult,
    },
    domain::{business::BusinessUpdate, resource::ResourceKind},
};
use tracing::info;

impl BusinessCommandService {
    pub async fn toggle_featured(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<BusinessDto> {
        let business = self.load(id).await?;
        ensure_can_feature(actor, ResourceKind::Business, business.owner_id)?;

        let update = BusinessUpdate {
            featured: Some(!business.featured),
            ..BusinessUpdate::new(business.id, self.clock.now())
        };
        Ok(self.businesses.update(update).await?.into())
    }

    /// Staff verification: stamps the date and activates the listing.
    pub async fn verify(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<BusinessDto> {
        ensure_capability(actor, "businesses", "verify")?;
        let business = self.load(id).await?;
        business.ensure_unverified()?;

        let verified = self
            .businesses
            .update(BusinessUpdate::verified(business.id, self.clock.now()))
            .await?;
        info!(business_id = %verified.id, verified_by = %actor.id, "verified business");
        Ok(verified.into())
    }
}
