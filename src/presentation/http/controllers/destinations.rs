// src/presentation/http/controllers/destinations.rs
use super::{deleted, page};
use crate::application::{
    commands::destinations::{CreateDestinationCommand, UpdateDestinationCommand},
    dto::{CursorPage, DestinationDto},
    queries::destinations::ListDestinationsQuery,
};
use crate::domain::destination::DestinationStatus;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct DestinationListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateDestinationRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub city: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: Option<DestinationStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDestinationRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<DestinationStatus>,
}

pub async fn list_destinations(
    Extension(state): Extension<HttpState>,
    Query(params): Query<DestinationListParams>,
) -> HttpResult<Json<CursorPage<DestinationDto>>> {
    let query = ListDestinationsQuery {
        page: page(params.limit, params.cursor),
        q: params.q,
        category: params.category,
        region: params.region,
        featured_only: params.featured,
    };

    state
        .services
        .destination_queries
        .list_destinations(query)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_destination(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<DestinationDto>> {
    state
        .services
        .destination_queries
        .get_destination_by_id(actor.user(), id)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_destination_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<DestinationDto>> {
    state
        .services
        .destination_queries
        .get_destination_by_slug(actor.user(), &slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_destination(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateDestinationRequest>,
) -> HttpResult<Json<DestinationDto>> {
    let command = CreateDestinationCommand {
        title: payload.title,
        description: payload.description,
        category: payload.category,
        region: payload.region,
        city: payload.city,
        address: payload.address,
        latitude: payload.latitude,
        longitude: payload.longitude,
        status: payload.status,
    };

    state
        .services
        .destination_commands
        .create_destination(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn update_destination(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDestinationRequest>,
) -> HttpResult<Json<DestinationDto>> {
    let command = UpdateDestinationCommand {
        id,
        title: payload.title,
        description: payload.description,
        category: payload.category,
        region: payload.region,
        city: payload.city,
        address: payload.address,
        latitude: payload.latitude,
        longitude: payload.longitude,
        status: payload.status,
    };

    state
        .services
        .destination_commands
        .update_destination(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_destination(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .destination_commands
        .delete_destination(&user, id)
        .await
        .into_http()?;

    Ok(deleted())
}

pub async fn toggle_featured(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<DestinationDto>> {
    state
        .services
        .destination_commands
        .toggle_featured(&user, id)
        .await
        .into_http()
        .map(Json)
}
