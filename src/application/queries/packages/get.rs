// src/application/queries/packages/get.rs
use super::{PackageQueryService, service::is_visible};
use crate::{
    application::{
        dto::{AuthenticatedUser, PackageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{ids::PackageId, slug::Slug},
};

impl PackageQueryService {
    pub async fn get_package_by_id(
        &self,
        viewer: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<PackageDto> {
        let id = PackageId::new(id)?;
        match self.packages.find_by_id(id).await? {
            Some(package) if is_visible(&package, viewer) => Ok(package.into()),
            _ => Err(ApplicationError::missing("package", id)),
        }
    }

    pub async fn get_package_by_slug(
        &self,
        viewer: Option<&AuthenticatedUser>,
        slug: &str,
    ) -> ApplicationResult<PackageDto> {
        let found = match Slug::new(slug) {
            Ok(slug) => self.packages.find_by_slug(&slug).await?,
            Err(_) => None,
        };
        match found {
            Some(package) if is_visible(&package, viewer) => Ok(package.into()),
            _ => Err(ApplicationError::not_found(format!("package '{slug}' not found"))),
        }
    }

    pub async fn categories(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.packages.categories().await?)
    }

    pub async fn regions(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.packages.regions().await?)
    }
}
