// src/application/queries/bookings/mod.rs
mod service;

pub use service::BookingQueryService;
