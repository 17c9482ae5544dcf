// src/application/commands/businesses/mod.rs
mod create;
mod moderation;
mod service;
mod update;

pub use create::CreateBusinessCommand;
pub use service::{BusinessCommandService, MAX_CONTACT_LEN, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use update::UpdateBusinessCommand;
