// src/application/queries/packages/mod.rs
mod get;
mod list;
mod service;

pub use list::ListPackagesQuery;
pub use service::PackageQueryService;
