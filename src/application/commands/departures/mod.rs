// src/application/commands/departures/mod.rs
mod service;

pub use service::{CreateDepartureCommand, DepartureCommandService, UpdateDepartureCommand};
