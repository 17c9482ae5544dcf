// src/domain/booking/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{Booking, BookingStatus, NewBooking};
pub use repository::BookingRepository;
