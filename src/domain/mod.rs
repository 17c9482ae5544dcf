// src/domain/mod.rs
pub mod access;
pub mod blog;
pub mod booking;
pub mod business;
pub mod cursor;
pub mod departure;
pub mod derived;
pub mod destination;
pub mod errors;
pub mod event;
pub mod ids;
pub mod package;
pub mod resource;
pub mod review;
pub mod saved;
pub mod slug;
pub mod user;
pub mod validation;
