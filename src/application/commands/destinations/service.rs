// src/application/commands/destinations/service.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::time::Clock,
};
use crate::domain::{
    destination::{Destination, DestinationRepository},
    ids::DestinationId,
    slug::SlugAssigner,
};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_LABEL_LEN: usize = 100;

pub struct DestinationCommandService {
    pub(super) destinations: Arc<dyn DestinationRepository>,
    pub(super) slugs: Arc<SlugAssigner>,
    pub(super) clock: Arc<dyn Clock>,
}

impl DestinationCommandService {
    pub fn new(
        destinations: Arc<dyn DestinationRepository>,
        slugs: Arc<SlugAssigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            destinations,
            slugs,
            clock,
        }
    }

    pub(super) async fn load(&self, id: i64) -> ApplicationResult<Destination> {
        let id = DestinationId::new(id)?;
        self.destinations
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("destination", id))
    }
}
