// src/application/commands/businesses/service.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::time::Clock,
};
use crate::domain::{
    business::{Business, BusinessRepository},
    errors::{DomainError, DomainResult},
    ids::BusinessId,
    slug::SlugAssigner,
    user::Email,
    validation::ensure_max_len,
};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_LABEL_LEN: usize = 100;
pub const MAX_CONTACT_LEN: usize = 255;

pub struct BusinessCommandService {
    pub(super) businesses: Arc<dyn BusinessRepository>,
    pub(super) slugs: Arc<SlugAssigner>,
    pub(super) clock: Arc<dyn Clock>,
}

impl BusinessCommandService {
    pub fn new(
        businesses: Arc<dyn BusinessRepository>,
        slugs: Arc<SlugAssigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            businesses,
            slugs,
            clock,
        }
    }

    pub(super) async fn load(&self, id: i64) -> ApplicationResult<Business> {
        let id = BusinessId::new(id)?;
        self.businesses
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("business", id))
    }
}

pub(super) fn contact_email(value: String) -> DomainResult<String> {
    Email::new(value)
        .map(String::from)
        .map_err(|_| DomainError::invalid("contact_email", "enter a valid email address"))
}

pub(super) fn contact_field(field: &'static str, value: String) -> DomainResult<String> {
    let value = value.trim().to_string();
    ensure_max_len(field, &value, MAX_CONTACT_LEN)?;
    Ok(value)
}
