// src/application/dto/blog.rs
use crate::domain::blog::{BlogPost, Comment, PostStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::serde_time;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub author_id: i64,
    pub author_name: String,
    pub status: PostStatus,
    pub views: i64,
    /// Whole minutes.
    pub read_time: u32,
    pub featured: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPost> for BlogPostDto {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.into(),
            title: post.title,
            slug: post.slug.into(),
            excerpt: post.excerpt,
            content: post.content,
            tags: post.tags,
            image_url: post.image_url,
            author_id: post.author_id.into(),
            author_name: post.author_name,
            status: post.status,
            views: post.views,
            read_time: post.read_time.minutes(),
            featured: post.featured,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub author_name: String,
    pub content: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.into(),
            post_id: comment.post_id.into(),
            user_id: comment.user_id.into(),
            author_name: comment.author_name,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewCountDto {
    pub views: i64,
}
