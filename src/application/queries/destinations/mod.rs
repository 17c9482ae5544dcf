// src/application/queries/destinations/mod.rs
mod service;

pub use service::{DestinationQueryService, ListDestinationsQuery};
