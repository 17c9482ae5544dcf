// src/application/queries/events/mod.rs
mod calendar;
mod get;
mod list;
mod service;

pub use list::ListEventsQuery;
pub use service::EventQueryService;
