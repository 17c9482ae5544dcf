// src/application/commands/packages/mod.rs
mod create;
mod delete;
mod service;
mod toggles;
mod update;

pub use create::CreatePackageCommand;
pub use service::PackageCommandService;
pub use update::UpdatePackageCommand;
