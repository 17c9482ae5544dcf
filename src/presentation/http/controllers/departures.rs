// src/presentation/http/controllers/departures.rs
use super::deleted;
use crate::application::{
    commands::departures::{CreateDepartureCommand, UpdateDepartureCommand},
    dto::DepartureDto,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CreateDepartureRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price_cents: i64,
    pub total_slots: i32,
    #[serde(default)]
    pub is_guaranteed: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDepartureRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub total_slots: Option<i32>,
    pub is_guaranteed: Option<bool>,
}

pub async fn list_for_package(
    Extension(state): Extension<HttpState>,
    Path(package_id): Path<i64>,
) -> HttpResult<Json<Vec<DepartureDto>>> {
    state
        .services
        .departure_queries
        .upcoming_for_package(package_id)
        .await
        .into_http()
        .map(Json)
}

pub async fn my_departures(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<DepartureDto>>> {
    state
        .services
        .departure_queries
        .my_departures(&user)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_departure(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<DepartureDto>> {
    state
        .services
        .departure_queries
        .get_departure(id)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_departure(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(package_id): Path<i64>,
    Json(payload): Json<CreateDepartureRequest>,
) -> HttpResult<Json<DepartureDto>> {
    let command = CreateDepartureCommand {
        package_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        price_cents: payload.price_cents,
        total_slots: payload.total_slots,
        is_guaranteed: payload.is_guaranteed,
    };

    state
        .services
        .departure_commands
        .create_departure(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn update_departure(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDepartureRequest>,
) -> HttpResult<Json<DepartureDto>> {
    let command = UpdateDepartureCommand {
        id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        price_cents: payload.price_cents,
        total_slots: payload.total_slots,
        is_guaranteed: payload.is_guaranteed,
    };

    state
        .services
        .departure_commands
        .update_departure(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_departure(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .departure_commands
        .delete_departure(&user, id)
        .await
        .into_http()?;

    Ok(deleted())
}
