// src/application/commands/blog/engagement.rs
use super::BlogCommandService;
use crate::{
    application::{
        commands::capability::{ensure_can_feature, ensure_capability},
        dto::{AuthenticatedUser, BlogPostDto, CommentDto, ViewCountDto},
        error::{ApplicationError, ApplicationResult},
        queries::blog::is_visible,
    },
    domain::{
        blog::{BlogPost, BlogPostUpdate, NewComment},
        ids::PostId,
        resource::ResourceKind,
        validation::required_text,
    },
};

pub const MAX_COMMENT_LEN: usize = 2_000;

pub struct AddCommentCommand {
    pub post_id: i64,
    pub content: String,
}

impl BlogCommandService {
    /// Counts a view of a post the viewer can see; hidden drafts are
    /// `NotFound`.
    pub async fn record_view(
        &self,
        viewer: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<ViewCountDto> {
        let post = self.load_visible(viewer, id).await?;
        let views = self.posts.increment_views(post.id).await?;
        Ok(ViewCountDto { views })
    }

    pub async fn toggle_featured(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<BlogPostDto> {
        let post = self.load(id).await?;
        ensure_can_feature(actor, ResourceKind::BlogPost, post.author_id)?;
        let update = BlogPostUpdate::new(post.id, self.clock.now()).with_featured(!post.featured);
        Ok(self.posts.update(update).await?.into())
    }

    pub async fn add_comment(
        &self,
        actor: &AuthenticatedUser,
        command: AddCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        ensure_capability(actor, "comments", "create")?;
        let post = self.load_visible(Some(actor), command.post_id).await?;
        let content = required_text("content", command.content, MAX_COMMENT_LEN)?;

        let comment = self
            .posts
            .insert_comment(NewComment {
                post_id: post.id,
                user_id: actor.id,
                content,
                created_at: self.clock.now(),
            })
            .await?;
        Ok(comment.into())
    }

    async fn load_visible(
        &self,
        viewer: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<BlogPost> {
        let id = PostId::new(id)?;
        match self.posts.find_by_id(id).await? {
            Some(post) if is_visible(&post, viewer) => Ok(post),
            _ => Err(ApplicationError::missing("blog post", id)),
        }
    }
}
