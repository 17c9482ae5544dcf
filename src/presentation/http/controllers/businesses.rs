// src/presentation/http/controllers/businesses.rs
use super::{deleted, page};
use crate::application::{
    commands::businesses::{
        CreateBusinessCommand, MAX_CONTACT_LEN, MAX_LABEL_LEN, MAX_NAME_LEN,
        UpdateBusinessCommand,
    },
    dto::{BusinessDto, CursorPage},
    queries::businesses::ListBusinessesQuery,
};
use crate::domain::business::BusinessOrder;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Date,
    Rating,
}

impl From<OrderBy> for BusinessOrder {
    fn from(order: OrderBy) -> Self {
        match order {
            OrderBy::Date => BusinessOrder::Newest,
            OrderBy::Rating => BusinessOrder::Rating,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BusinessListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    #[serde(alias = "search")]
    pub q: Option<String>,
    pub business_type: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order_by: OrderBy,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub business_type: String,
    pub description: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub region: String,
    pub city: String,
    pub address: Option<String>,
    /// `[longitude, latitude]`
    pub coordinates: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBusinessRequest {
    pub name: Option<String>,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Vec<f64>>,
}

/// Field description for business listing clients; static metadata only.
pub async fn new_form() -> Json<Value> {
    Json(json!({
        "fields": [
            { "name": "name", "type": "string", "required": true, "maxLength": MAX_NAME_LEN },
            {
                "name": "business_type",
                "type": "string",
                "required": true,
                "maxLength": MAX_LABEL_LEN
            },
            { "name": "description", "type": "text", "required": true },
            {
                "name": "contact_email",
                "type": "email",
                "required": false,
                "maxLength": MAX_CONTACT_LEN
            },
            {
                "name": "contact_phone",
                "type": "string",
                "required": false,
                "maxLength": MAX_CONTACT_LEN
            },
            { "name": "website", "type": "url", "required": false, "maxLength": MAX_CONTACT_LEN },
            { "name": "region", "type": "string", "required": true, "maxLength": MAX_LABEL_LEN },
            { "name": "city", "type": "string", "required": true, "maxLength": MAX_LABEL_LEN },
            { "name": "address", "type": "string", "required": false },
            {
                "name": "coordinates",
                "type": "point",
                "required": false,
                "format": "[longitude, latitude]"
            }
        ]
    }))
}

pub async fn list_businesses(
    Extension(state): Extension<HttpState>,
    Query(params): Query<BusinessListParams>,
) -> HttpResult<Json<CursorPage<BusinessDto>>> {
    let query = ListBusinessesQuery {
        page: page(params.limit, params.cursor),
        q: params.q,
        business_type: params.business_type,
        region: params.region,
        city: params.city,
        featured_only: params.featured,
        order: params.order_by.into(),
    };

    state
        .services
        .business_queries
        .list_businesses(query)
        .await
        .into_http()
        .map(Json)
}

pub async fn featured_businesses(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<BusinessDto>>> {
    let query = ListBusinessesQuery {
        page: page(params.limit, params.cursor),
        featured_only: true,
        ..Default::default()
    };

    state
        .services
        .business_queries
        .list_businesses(query)
        .await
        .into_http()
        .map(Json)
}

pub async fn my_businesses(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<BusinessDto>>> {
    state
        .services
        .business_queries
        .my_businesses(&user, page(params.limit, params.cursor))
        .await
        .into_http()
        .map(Json)
}

pub async fn get_business(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<BusinessDto>> {
    state
        .services
        .business_queries
        .get_business_by_id(actor.user(), id)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_business_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<BusinessDto>> {
    state
        .services
        .business_queries
        .get_business_by_slug(actor.user(), &slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_business(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateBusinessRequest>,
) -> HttpResult<Json<BusinessDto>> {
    let command = CreateBusinessCommand {
        name: payload.name,
        business_type: payload.business_type,
        description: payload.description,
        contact_email: payload.contact_email,
        contact_phone: payload.contact_phone,
        website: payload.website,
        region: payload.region,
        city: payload.city,
        address: payload.address,
        coordinates: payload.coordinates,
    };

    state
        .services
        .business_commands
        .create_business(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn update_business(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBusinessRequest>,
) -> HttpResult<Json<BusinessDto>> {
    let command = UpdateBusinessCommand {
        id,
        name: payload.name,
        business_type: payload.business_type,
        description: payload.description,
        contact_email: payload.contact_email,
        contact_phone: payload.contact_phone,
        website: payload.website,
        region: payload.region,
        city: payload.city,
        address: payload.address,
        coordinates: payload.coordinates,
    };

    state
        .services
        .business_commands
        .update_business(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_business(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .business_commands
        .delete_business(&user, id)
        .await
        .into_http()?;

    Ok(deleted())
}

pub async fn toggle_featured(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<BusinessDto>> {
    state
        .services
        .business_commands
        .toggle_featured(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn verify(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<BusinessDto>> {
    state
        .services
        .business_commands
        .verify(&user, id)
        .await
        .into_http()
        .map(Json)
}
