// src/application/queries/mod.rs
pub mod blog;
pub mod bookings;
pub mod businesses;
pub mod departures;
pub mod destinations;
pub mod events;
pub mod listing;
pub mod packages;
pub mod reviews;
pub mod users;
