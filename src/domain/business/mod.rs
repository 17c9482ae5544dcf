// src/domain/business/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{Business, BusinessStatus, BusinessUpdate, NewBusiness};
pub use repository::{BusinessFilter, BusinessOrder, BusinessRepository};
