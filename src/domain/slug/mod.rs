// src/domain/slug/mod.rs
pub mod repository;
pub mod services;
pub mod value_objects;

pub use repository::SlugRepository;
pub use services::SlugAssigner;
pub use value_objects::{Disambiguator, Slug, SlugPolicy, SlugRules};
