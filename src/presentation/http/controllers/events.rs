// src/presentation/http/controllers/events.rs
use super::{deleted, page};
use crate::application::{
    commands::events::{CreateEventCommand, UpdateEventCommand},
    dto::{CalendarDayDto, CursorPage, EventDto, RegistrationDto},
    queries::events::ListEventsQuery,
};
use crate::domain::event::EventStatus;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_cents: Option<i64>,
    pub capacity: Option<i32>,
    pub status: Option<EventStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_cents: Option<i64>,
    pub capacity: Option<i32>,
}

pub async fn list_events(
    Extension(state): Extension<HttpState>,
    Query(params): Query<EventListParams>,
) -> HttpResult<Json<CursorPage<EventDto>>> {
    let query = ListEventsQuery {
        page: page(params.limit, params.cursor),
        q: params.q,
        category: params.category,
        featured_only: params.featured,
    };

    state
        .services
        .event_queries
        .list_events(query)
        .await
        .into_http()
        .map(Json)
}

pub async fn upcoming_events(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<EventDto>>> {
    state
        .services
        .event_queries
        .upcoming_events(page(params.limit, params.cursor))
        .await
        .into_http()
        .map(Json)
}

pub async fn featured_events(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<EventDto>>> {
    state
        .services
        .event_queries
        .featured_events(page(params.limit, params.cursor))
        .await
        .into_http()
        .map(Json)
}

pub async fn categories(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<String>>> {
    state
        .services
        .event_queries
        .categories()
        .await
        .into_http()
        .map(Json)
}

pub async fn my_events(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<EventDto>>> {
    state
        .services
        .event_queries
        .my_events(&user, page(params.limit, params.cursor))
        .await
        .into_http()
        .map(Json)
}

pub async fn calendar(
    Extension(state): Extension<HttpState>,
    Query(params): Query<CalendarParams>,
) -> HttpResult<Json<Vec<CalendarDayDto>>> {
    state
        .services
        .event_queries
        .calendar(params.year, params.month)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_event(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<EventDto>> {
    state
        .services
        .event_queries
        .get_event_by_id(actor.user(), id)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_event_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<EventDto>> {
    state
        .services
        .event_queries
        .get_event_by_slug(actor.user(), &slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_event(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateEventRequest>,
) -> HttpResult<Json<EventDto>> {
    let command = CreateEventCommand {
        title: payload.title,
        description: payload.description,
        category: payload.category,
        start_date: payload.start_date,
        end_date: payload.end_date,
        location: payload.location,
        address: payload.address,
        latitude: payload.latitude,
        longitude: payload.longitude,
        price_cents: payload.price_cents,
        capacity: payload.capacity,
        status: payload.status,
    };

    state
        .services
        .event_commands
        .create_event(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn update_event(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEventRequest>,
) -> HttpResult<Json<EventDto>> {
    let command = UpdateEventCommand {
        id,
        title: payload.title,
        description: payload.description,
        category: payload.category,
        start_date: payload.start_date,
        end_date: payload.end_date,
        location: payload.location,
        address: payload.address,
        latitude: payload.latitude,
        longitude: payload.longitude,
        price_cents: payload.price_cents,
        capacity: payload.capacity,
    };

    state
        .services
        .event_commands
        .update_event(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_event(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .event_commands
        .delete_event(&user, id)
        .await
        .into_http()?;

    Ok(deleted())
}

pub async fn toggle_status(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<EventDto>> {
    state
        .services
        .event_commands
        .toggle_status(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn toggle_featured(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<EventDto>> {
    state
        .services
        .event_commands
        .toggle_featured(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn register(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<RegistrationDto>> {
    state
        .services
        .event_commands
        .register(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn cancel_registration(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<RegistrationDto>> {
    state
        .services
        .event_commands
        .cancel_registration(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn list_registrations(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<RegistrationDto>>> {
    state
        .services
        .event_queries
        .list_registrations(&user, id)
        .await
        .into_http()
        .map(Json)
}
