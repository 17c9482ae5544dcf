// src/application/commands/bookings/mod.rs
mod service;

pub use service::{BookingCommandService, CreateBookingCommand};
