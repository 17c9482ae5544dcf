// src/application/queries/departures/mod.rs
mod service;

pub use service::DepartureQueryService;
