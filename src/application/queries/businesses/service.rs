// src/application/queries/businesses/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, BusinessDto, CursorPage},
        error::{ApplicationError, ApplicationResult},
        queries::listing::{PageRequest, non_blank},
    },
    domain::{
        business::{Business, BusinessFilter, BusinessOrder, BusinessRepository, BusinessStatus},
        ids::BusinessId,
        slug::Slug,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ListBusinessesQuery {
    pub page: PageRequest,
    pub q: Option<String>,
    pub business_type: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub featured_only: bool,
    pub order: BusinessOrder,
}

pub struct BusinessQueryService {
    businesses: Arc<dyn BusinessRepository>,
}

impl BusinessQueryService {
    pub fn new(businesses: Arc<dyn BusinessRepository>) -> Self {
        Self { businesses }
    }

    pub async fn get_business_by_id(
        &self,
        viewer: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<BusinessDto> {
        let id = BusinessId::new(id)?;
        match self.businesses.find_by_id(id).await? {
            Some(business) if is_visible(&business, viewer) => Ok(business.into()),
            _ => Err(ApplicationError::missing("business", id)),
        }
    }

    pub async fn get_business_by_slug(
        &self,
        viewer: Option<&AuthenticatedUser>,
        slug: &str,
    ) -> ApplicationResult<BusinessDto> {
        let found = match Slug::new(slug) {
            Ok(slug) => self.businesses.find_by_slug(&slug).await?,
            Err(_) => None,
        };
        match found {
            Some(business) if is_visible(&business, viewer) => Ok(business.into()),
            _ => Err(ApplicationError::not_found(format!("business '{slug}' not found"))),
        }
    }

    pub async fn list_businesses(
        &self,
        query: ListBusinessesQuery,
    ) -> ApplicationResult<CursorPage<BusinessDto>> {
        let filter = BusinessFilter {
            business_type: non_blank(query.business_type),
            region: non_blank(query.region),
            city: non_blank(query.city),
            search: non_blank(query.q),
            owner: None,
            featured_only: query.featured_only,
            order: query.order,
        };
        self.page(filter, &query.page).await
    }

    /// The actor's own businesses, pending ones included.
    pub async fn my_businesses(
        &self,
        actor: &AuthenticatedUser,
        page: PageRequest,
    ) -> ApplicationResult<CursorPage<BusinessDto>> {
        let filter = BusinessFilter {
            owner: Some(actor.id),
            ..Default::default()
        };
        self.page(filter, &page).await
    }

    async fn page(
        &self,
        filter: BusinessFilter,
        page: &PageRequest,
    ) -> ApplicationResult<CursorPage<BusinessDto>> {
        let (limit, cursor) = page.resolve()?;
        let (businesses, next) = self.businesses.list_page(filter, limit, cursor).await?;
        Ok(CursorPage::from_page(businesses, next))
    }
}

fn is_visible(business: &Business, viewer: Option<&AuthenticatedUser>) -> bool {
    business.status == BusinessStatus::Active
        || viewer.is_some_and(|user| {
            user.id == business.owner_id || user.has_capability("businesses", "update:any")
        })
}
