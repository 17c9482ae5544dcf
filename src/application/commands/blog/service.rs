// src/application/commands/blog/service.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::time::Clock,
};
use crate::domain::{
    blog::{BlogPost, BlogPostRepository},
    ids::PostId,
    slug::SlugAssigner,
};

pub struct BlogCommandService {
    pub(super) posts: Arc<dyn BlogPostRepository>,
    pub(super) slugs: Arc<SlugAssigner>,
    pub(super) clock: Arc<dyn Clock>,
}

impl BlogCommandService {
    pub fn new(
        posts: Arc<dyn BlogPostRepository>,
        slugs: Arc<SlugAssigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { posts, slugs, clock }
    }

    pub(super) async fn load(&self, id: i64) -> ApplicationResult<BlogPost> {
        let id = PostId::new(id)?;
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::missing("blog post", id))
    }
}
