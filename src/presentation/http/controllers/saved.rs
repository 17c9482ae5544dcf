// src/presentation/http/controllers/saved.rs
use crate::application::dto::SavedItemDto;
use crate::domain::resource::ResourceKind;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    routing::{MethodRouter, post},
};
use serde_json::{Value, json};

/// `POST` saves and `DELETE` unsaves `/{parent}/{id}/save` for one kind.
pub fn routes_for(kind: ResourceKind) -> MethodRouter {
    post(
        move |state: Extension<HttpState>, user: Authenticated, path: Path<i64>| {
            save(kind, state, user, path)
        },
    )
    .delete(
        move |state: Extension<HttpState>, user: Authenticated, path: Path<i64>| {
            unsave(kind, state, user, path)
        },
    )
}

pub async fn save(
    kind: ResourceKind,
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(target_id): Path<i64>,
) -> HttpResult<Json<SavedItemDto>> {
    state
        .services
        .saved_items
        .save(&user, kind, target_id)
        .await
        .into_http()
        .map(Json)
}

pub async fn unsave(
    kind: ResourceKind,
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(target_id): Path<i64>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .saved_items
        .unsave(&user, kind, target_id)
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "unsaved" })))
}

/// `GET /api/v1/saved/{kind}`; the kind is the snake_case resource name.
pub async fn list_saved(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(kind): Path<ResourceKind>,
) -> HttpResult<Json<Vec<SavedItemDto>>> {
    state
        .services
        .saved_items
        .list_saved(&user, kind)
        .await
        .into_http()
        .map(Json)
}
