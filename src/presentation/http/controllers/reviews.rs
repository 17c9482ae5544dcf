// src/presentation/http/controllers/reviews.rs
//! Reviews are shared by several record families; the per-kind routes are
//! built by [`routes_for`], which pins the [`ResourceKind`] of the parent.
use super::deleted;
use crate::application::{
    commands::reviews::AddReviewCommand,
    dto::{HelpfulVotesDto, ReviewDto},
};
use crate::domain::resource::ResourceKind;
use crate::domain::review::ReviewSort;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    routing::{MethodRouter, get},
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct ReviewListParams {
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddReviewRequest {
    pub rating: i32,
    pub title: Option<String>,
    pub comment: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportReviewRequest {
    pub reason: Option<String>,
}

/// `GET` and `POST` on `/{parent}/{id}/reviews` for one kind of parent record.
pub fn routes_for(kind: ResourceKind) -> MethodRouter {
    get(
        move |state: Extension<HttpState>,
              path: Path<i64>,
              params: Query<ReviewListParams>| list_reviews(kind, state, path, params),
    )
    .post(
        move |state: Extension<HttpState>,
              user: Authenticated,
              path: Path<i64>,
              payload: Json<AddReviewRequest>| add_review(kind, state, user, path, payload),
    )
}

pub async fn list_reviews(
    kind: ResourceKind,
    Extension(state): Extension<HttpState>,
    Path(target_id): Path<i64>,
    Query(params): Query<ReviewListParams>,
) -> HttpResult<Json<Vec<ReviewDto>>> {
    let sort = match params.sort.as_deref() {
        Some(raw) => raw
            .parse::<ReviewSort>()
            .map_err(|err| HttpError::from_error(err.into()))?,
        None => ReviewSort::default(),
    };

    state
        .services
        .review_queries
        .list_reviews(kind, target_id, sort)
        .await
        .into_http()
        .map(Json)
}

pub async fn add_review(
    kind: ResourceKind,
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(target_id): Path<i64>,
    Json(payload): Json<AddReviewRequest>,
) -> HttpResult<Json<ReviewDto>> {
    let command = AddReviewCommand {
        target_kind: kind,
        target_id,
        rating: payload.rating,
        title: payload.title,
        comment: payload.comment,
    };

    state
        .services
        .review_commands
        .add_review(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn mark_helpful(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<HelpfulVotesDto>> {
    state
        .services
        .review_commands
        .mark_helpful(id)
        .await
        .into_http()
        .map(Json)
}

pub async fn report_review(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<i64>,
    payload: Option<Json<ReportReviewRequest>>,
) -> HttpResult<Json<ReviewDto>> {
    let reason = payload.and_then(|Json(body)| body.reason);

    state
        .services
        .review_commands
        .report_review(id, reason)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_review(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .review_commands
        .delete_review(&user, id)
        .await
        .into_http()?;

    Ok(deleted())
}
