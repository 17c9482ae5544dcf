// src/application/commands/packages/service.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::time::Clock,
};
use crate::domain::{
    ids::PackageId,
    package::{Package, PackageRepository},
    slug::SlugAssigner,
};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_SHORT_DESCRIPTION_LEN: usize = 300;
pub const MAX_LABEL_LEN: usize = 100;

pub struct PackageCommandService {
    pub(super) packages: Arc<dyn PackageRepository>,
    pub(super) slugs: Arc<SlugAssigner>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PackageCommandService {
    pub fn new(
        packages: Arc<dyn PackageRepository>,
        slugs: Arc<SlugAssigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            packages,
            slugs,
            clock,
        }
    }

    pub(super) async fn load(&self, id: i64) -> ApplicationResult<Package> {
        let id = PackageId::new(id)?;
        self.packages
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("package", id))
    }
}
