// src/application/queries/reviews/mod.rs
mod service;

pub use service::ReviewQueryService;
