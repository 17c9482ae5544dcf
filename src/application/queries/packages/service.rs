// src/application/queries/packages/service.rs
use std::sync::Arc;

use crate::application::dto::AuthenticatedUser;
use crate::domain::package::{Package, PackageRepository, PackageStatus};

pub struct PackageQueryService {
    pub(super) packages: Arc<dyn PackageRepository>,
}

impl PackageQueryService {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }
}

/// Draft packages are only shown to their owner and to staff.
pub(super) fn is_visible(package: &Package, viewer: Option<&AuthenticatedUser>) -> bool {
    package.status == PackageStatus::Active
        || viewer.is_some_and(|user| {
            user.id == package.owner_id || user.has_capability("packages", "update:any")
        })
}
