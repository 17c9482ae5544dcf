// src/domain/review/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{NewReview, Rating, Review, ReviewSort};
pub use repository::ReviewRepository;
