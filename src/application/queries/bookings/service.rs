// src/application/queries/bookings/service.rs
use std::sync::Arc;

use crate::application::{
    dto::{AuthenticatedUser, BookingDto, CursorPage},
    error::ApplicationResult,
    ports::time::Clock,
    queries::listing::PageRequest,
};
use crate::domain::booking::BookingRepository;

pub struct BookingQueryService {
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl BookingQueryService {
    pub fn new(bookings: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { bookings, clock }
    }

    pub async fn list_bookings(
        &self,
        actor: &AuthenticatedUser,
        page: PageRequest,
    ) -> ApplicationResult<CursorPage<BookingDto>> {
        let (limit, cursor) = page.resolve()?;
        let (bookings, next) = self.bookings.list_for_user(actor.id, limit, cursor).await?;
        Ok(CursorPage::from_page(bookings, next))
    }

    pub async fn upcoming_bookings(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<BookingDto>> {
        let bookings = self
            .bookings
            .upcoming_for_user(actor.id, self.clock.now())
            .await?;
        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }
}
