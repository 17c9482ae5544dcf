// src/application/queries/businesses/mod.rs
mod service;

pub use service::{BusinessQueryService, ListBusinessesQuery};
