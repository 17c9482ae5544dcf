// src/application/commands/reviews/mod.rs
mod aggregates;
mod service;

pub use service::{AddReviewCommand, ReviewCommandService};
