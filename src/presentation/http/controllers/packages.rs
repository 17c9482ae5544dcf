// src/presentation/http/controllers/packages.rs
use super::{deleted, page};
use crate::application::{
    commands::packages::{CreatePackageCommand, UpdatePackageCommand},
    dto::{CursorPage, PackageDto},
    queries::packages::ListPackagesQuery,
};
use crate::domain::package::PackageStatus;
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
pub struct PackageListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub mine: bool,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePackageRequest {
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub location: String,
    pub region: String,
    pub category: String,
    pub price_cents: i64,
    pub discounted_price_cents: Option<i64>,
    pub duration_in_days: i32,
    pub max_group_size: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<PackageStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePackageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub discounted_price_cents: Option<i64>,
    pub duration_in_days: Option<i32>,
    pub max_group_size: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<PackageStatus>,
}

pub async fn list_packages(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Query(params): Query<PackageListParams>,
) -> HttpResult<Json<CursorPage<PackageDto>>> {
    let query = ListPackagesQuery {
        page: page(params.limit, params.cursor),
        q: params.q,
        category: params.category,
        region: params.region,
        featured_only: params.featured,
        mine: params.mine,
    };

    state
        .services
        .package_queries
        .list_packages(actor.user(), query)
        .await
        .into_http()
        .map(Json)
}

pub async fn featured_packages(
    Extension(state): Extension<HttpState>,
    Query(params): Query<FeaturedParams>,
) -> HttpResult<Json<CursorPage<PackageDto>>> {
    state
        .services
        .package_queries
        .featured_packages(params.limit.unwrap_or_default())
        .await
        .into_http()
        .map(Json)
}

pub async fn categories(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<String>>> {
    state
        .services
        .package_queries
        .categories()
        .await
        .into_http()
        .map(Json)
}

pub async fn regions(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<String>>> {
    state
        .services
        .package_queries
        .regions()
        .await
        .into_http()
        .map(Json)
}

pub async fn get_package(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<PackageDto>> {
    state
        .services
        .package_queries
        .get_package_by_id(actor.user(), id)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_package_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<PackageDto>> {
    state
        .services
        .package_queries
        .get_package_by_slug(actor.user(), &slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_package(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreatePackageRequest>,
) -> HttpResult<Json<PackageDto>> {
    let command = CreatePackageCommand {
        title: payload.title,
        description: payload.description,
        short_description: payload.short_description,
        location: payload.location,
        region: payload.region,
        category: payload.category,
        price_cents: payload.price_cents,
        discounted_price_cents: payload.discounted_price_cents,
        duration_in_days: payload.duration_in_days,
        max_group_size: payload.max_group_size,
        latitude: payload.latitude,
        longitude: payload.longitude,
        status: payload.status,
    };

    state
        .services
        .package_commands
        .create_package(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn update_package(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePackageRequest>,
) -> HttpResult<Json<PackageDto>> {
    let command = UpdatePackageCommand {
        id,
        title: payload.title,
        description: payload.description,
        short_description: payload.short_description,
        location: payload.location,
        region: payload.region,
        category: payload.category,
        price_cents: payload.price_cents,
        discounted_price_cents: payload.discounted_price_cents,
        duration_in_days: payload.duration_in_days,
        max_group_size: payload.max_group_size,
        latitude: payload.latitude,
        longitude: payload.longitude,
        status: payload.status,
    };

    state
        .services
        .package_commands
        .update_package(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_package(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .package_commands
        .delete_package(&user, id)
        .await
        .into_http()?;

    Ok(deleted())
}

pub async fn toggle_featured(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<PackageDto>> {
    state
        .services
        .package_commands
        .toggle_featured(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn toggle_status(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<PackageDto>> {
    state
        .services
        .package_commands
        .toggle_status(&user, id)
        .await
        .into_http()
        .map(Json)
}
