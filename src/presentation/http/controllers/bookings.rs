// src/presentation/http/controllers/bookings.rs
use super::page;
use crate::application::{
    commands::bookings::CreateBookingCommand,
    dto::{BookingDto, CursorPage},
};
use crate::domain::resource::ResourceKind;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub target_kind: ResourceKind,
    pub target_id: i64,
    #[serde(default = "one_guest")]
    pub guests: i32,
    pub notes: Option<String>,
    pub departure_id: Option<i64>,
}

fn one_guest() -> i32 {
    1
}

pub async fn list_bookings(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<BookingListParams>,
) -> HttpResult<Json<CursorPage<BookingDto>>> {
    state
        .services
        .booking_queries
        .list_bookings(&user, page(params.limit, params.cursor))
        .await
        .into_http()
        .map(Json)
}

pub async fn upcoming_bookings(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<BookingDto>>> {
    state
        .services
        .booking_queries
        .upcoming_bookings(&user)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_booking(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateBookingRequest>,
) -> HttpResult<Json<BookingDto>> {
    let command = CreateBookingCommand {
        target_kind: payload.target_kind,
        target_id: payload.target_id,
        guests: payload.guests,
        notes: payload.notes,
        departure_id: payload.departure_id,
    };

    state
        .services
        .booking_commands
        .create_booking(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn confirm_booking(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<BookingDto>> {
    state
        .services
        .booking_commands
        .confirm_booking(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn cancel_booking(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<BookingDto>> {
    state
        .services
        .booking_commands
        .cancel_booking(&user, id)
        .await
        .into_http()
        .map(Json)
}
