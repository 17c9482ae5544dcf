// src/presentation/http/controllers/users.rs
use super::page;
use crate::application::{
    commands::users::ChangePasswordCommand,
    dto::{CursorPage, UserDto},
    queries::users::ListUsersQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: String,
    pub new_password_confirmation: String,
}

pub async fn list_users(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<ListUsersParams>,
) -> HttpResult<Json<CursorPage<UserDto>>> {
    let query = ListUsersQuery {
        page: page(params.limit, params.cursor),
        q: params.q,
    };

    state
        .services
        .user_queries
        .list_users(&user, query)
        .await
        .into_http()
        .map(Json)
}

pub async fn toggle_active(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .toggle_active(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn toggle_staff(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .toggle_staff(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn change_password(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<ChangePasswordRequest>,
) -> HttpResult<Json<Value>> {
    let command = ChangePasswordCommand {
        user_id: id,
        current_password: payload.current_password,
        new_password: payload.new_password,
        new_password_confirmation: payload.new_password_confirmation,
    };

    state
        .services
        .user_commands
        .change_password(&user, command)
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "password_changed" })))
}
