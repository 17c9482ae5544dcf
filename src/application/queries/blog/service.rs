// src/application/queries/blog/service.rs
use std::sync::Arc;

use crate::application::dto::AuthenticatedUser;
use crate::domain::blog::{BlogPost, BlogPostRepository};

pub struct BlogQueryService {
    pub(super) posts: Arc<dyn BlogPostRepository>,
}

impl BlogQueryService {
    pub fn new(posts: Arc<dyn BlogPostRepository>) -> Self {
        Self { posts }
    }
}

/// Drafts are visible to their author and to holders of `blog:view:drafts`.
pub(crate) fn is_visible(post: &BlogPost, viewer: Option<&AuthenticatedUser>) -> bool {
    post.is_published()
        || viewer.is_some_and(|user| {
            user.id == post.author_id || user.has_capability("blog", "view:drafts")
        })
}
