// src/domain/event/mod.rs
pub mod entity;
pub mod registration;
pub mod repository;

pub use entity::{Event, EventStatus, EventUpdate, NewEvent};
pub use registration::{Registration, RegistrationStatus};
pub use repository::{EventFilter, EventOrder, EventRepository, RegistrationRepository};
