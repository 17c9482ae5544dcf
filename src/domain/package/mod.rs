// src/domain/package/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{NewPackage, Package, PackageStatus, PackageUpdate};
pub use repository::{PackageFilter, PackageRepository};
