// src/domain/destination/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{Destination, DestinationStatus, DestinationUpdate, NewDestination};
pub use repository::{DestinationFilter, DestinationRepository};
