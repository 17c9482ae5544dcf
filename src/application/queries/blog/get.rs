// src/application/queries/blog/get.rs
use super::{BlogQueryService, service::is_visible};
use crate::{
    application::{
        dto::{AuthenticatedUser, BlogPostDto, CommentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{blog::BlogPost, ids::PostId, slug::Slug},
};

impl BlogQueryService {
    pub async fn get_post_by_id(
        &self,
        viewer: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<BlogPostDto> {
        let id = PostId::new(id)?;
        let post = self.posts.find_by_id(id).await?;
        visible(post, viewer, || ApplicationError::missing("blog post", id))
    }

    pub async fn get_post_by_slug(
        &self,
        viewer: Option<&AuthenticatedUser>,
        slug: &str,
    ) -> ApplicationResult<BlogPostDto> {
        let missing = || ApplicationError::not_found(format!("blog post '{slug}' not found"));
        let Ok(slug) = Slug::new(slug) else {
            return Err(missing());
        };
        let post = self.posts.find_by_slug(&slug).await?;
        visible(post, viewer, missing)
    }

    pub async fn list_comments(
        &self,
        viewer: Option<&AuthenticatedUser>,
        post_id: i64,
    ) -> ApplicationResult<Vec<CommentDto>> {
        let id = PostId::new(post_id)?;
        let post = self.posts.find_by_id(id).await?;
        visible(post, viewer, || ApplicationError::missing("blog post", id))?;

        let comments = self.posts.list_comments(id).await?;
        Ok(comments.into_iter().map(CommentDto::from).collect())
    }
}

fn visible(
    post: Option<BlogPost>,
    viewer: Option<&AuthenticatedUser>,
    missing: impl FnOnce() -> ApplicationError,
) -> ApplicationResult<BlogPostDto> {
    match post {
        Some(post) if is_visible(&post, viewer) => Ok(post.into()),
        _ => Err(missing()),
    }
}
