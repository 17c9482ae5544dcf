// src/application/commands/mod.rs
pub mod blog;
pub mod bookings;
pub mod businesses;
pub(crate) mod capability;
pub mod departures;
pub mod destinations;
pub mod events;
pub mod packages;
pub mod reviews;
pub mod saved;
pub mod users;
