// src/application/queries/packages/list.rs
use super::PackageQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, CursorPage, PackageDto},
        error::{ApplicationError, ApplicationResult},
        queries::listing::{PageRequest, non_blank},
    },
    domain::package::PackageFilter,
};

#[derive(Debug, Clone, Default)]
pub struct ListPackagesQuery {
    pub page: PageRequest,
    pub q: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub featured_only: bool,
    pub mine: bool,
}

impl PackageQueryService {
    pub async fn list_packages(
        &self,
        viewer: Option<&AuthenticatedUser>,
        query: ListPackagesQuery,
    ) -> ApplicationResult<CursorPage<PackageDto>> {
        let (limit, cursor) = query.page.resolve()?;
        let owner = if query.mine {
            let user = viewer
                .ok_or_else(|| ApplicationError::unauthorized("sign in to list your packages"))?;
            Some(user.id)
        } else {
            None
        };

        let filter = PackageFilter {
            category: non_blank(query.category),
            region: non_blank(query.region),
            search: non_blank(query.q),
            featured_only: query.featured_only,
            owner,
        };
        let (packages, next) = self.packages.list_page(filter, limit, cursor).await?;
        Ok(CursorPage::from_page(packages, next))
    }

    pub async fn featured_packages(&self, limit: u32) -> ApplicationResult<CursorPage<PackageDto>> {
        self.list_packages(
            None,
            ListPackagesQuery {
                page: PageRequest {
                    limit,
                    cursor: None,
                },
                featured_only: true,
                ..Default::default()
            },
        )
        .await
    }
}
