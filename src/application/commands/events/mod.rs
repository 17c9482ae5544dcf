// src/application/commands/events/mod.rs
mod create;
mod lifecycle;
mod registration;
mod service;
mod update;

pub use create::CreateEventCommand;
pub use service::EventCommandService;
pub use update::UpdateEventCommand;
