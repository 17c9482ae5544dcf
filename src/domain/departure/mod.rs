// src/domain/departure/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{Departure, DepartureUpdate, NewDeparture};
pub use repository::DepartureRepository;
