// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod blog;
pub mod bookings;
pub mod businesses;
pub mod departures;
pub mod destinations;
pub mod events;
pub mod packages;
pub mod reviews;
pub mod saved;
pub mod users;

use crate::application::queries::listing::PageRequest;
use axum::Json;
use serde_json::{Value, json};

pub(crate) fn page(limit: Option<u32>, cursor: Option<String>) -> PageRequest {
    PageRequest {
        limit: limit.unwrap_or_default(),
        cursor,
    }
}

pub(crate) fn deleted() -> Json<Value> {
    Json(json!({ "status": "deleted" }))
}
