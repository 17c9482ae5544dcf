// src/application/commands/destinations/mod.rs
mod create;
mod service;
mod update;

pub use create::CreateDestinationCommand;
pub use service::DestinationCommandService;
pub use update::UpdateDestinationCommand;
