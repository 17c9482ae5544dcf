// src/presentation/http/controllers/blog.rs
use super::{deleted, page};
use crate::application::{
    commands::blog::{AddCommentCommand, CreatePostCommand, UpdatePostCommand},
    dto::{BlogPostDto, CommentDto, CursorPage, ViewCountDto},
    queries::blog::ListPostsQuery,
};
use crate::domain::blog::PostStatus;
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
pub struct PostListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub q: Option<String>,
    pub tag: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub include_drafts: bool,
    #[serde(default)]
    pub mine: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub status: Option<PostStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub status: Option<PostStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Query(params): Query<PostListParams>,
) -> HttpResult<Json<CursorPage<BlogPostDto>>> {
    let query = ListPostsQuery {
        page: page(params.limit, params.cursor),
        q: params.q,
        tag: params.tag,
        featured_only: params.featured,
        include_drafts: params.include_drafts,
        mine: params.mine,
    };

    state
        .services
        .blog_queries
        .list_posts(actor.user(), query)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_post(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<BlogPostDto>> {
    state
        .services
        .blog_queries
        .get_post_by_id(actor.user(), id)
        .await
        .into_http()
        .map(Json)
}

pub async fn get_post_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<BlogPostDto>> {
    state
        .services
        .blog_queries
        .get_post_by_slug(actor.user(), &slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_post(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreatePostRequest>,
) -> HttpResult<Json<BlogPostDto>> {
    let command = CreatePostCommand {
        title: payload.title,
        excerpt: payload.excerpt,
        content: payload.content,
        tags: payload.tags,
        image_url: payload.image_url,
        status: payload.status,
    };

    state
        .services
        .blog_commands
        .create_post(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn update_post(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> HttpResult<Json<BlogPostDto>> {
    let command = UpdatePostCommand {
        id,
        title: payload.title,
        excerpt: payload.excerpt,
        content: payload.content,
        tags: payload.tags,
        image_url: payload.image_url,
        status: payload.status,
    };

    state
        .services
        .blog_commands
        .update_post(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_post(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Value>> {
    state
        .services
        .blog_commands
        .delete_post(&user, id)
        .await
        .into_http()?;

    Ok(deleted())
}

pub async fn record_view(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ViewCountDto>> {
    state
        .services
        .blog_commands
        .record_view(actor.user(), id)
        .await
        .into_http()
        .map(Json)
}

pub async fn toggle_featured(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<BlogPostDto>> {
    state
        .services
        .blog_commands
        .toggle_featured(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn list_comments(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<CommentDto>>> {
    state
        .services
        .blog_queries
        .list_comments(actor.user(), id)
        .await
        .into_http()
        .map(Json)
}

pub async fn add_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<CommentRequest>,
) -> HttpResult<Json<CommentDto>> {
    let command = AddCommentCommand {
        post_id: id,
        content: payload.content,
    };

    state
        .services
        .blog_commands
        .add_comment(&user, command)
        .await
        .into_http()
        .map(Json)
}
