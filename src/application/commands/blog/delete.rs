// src/application/commands/blog/delete.rs
use super::BlogCommandService;
use crate::{
    application::{
        commands::capability::ensure_owner_or_any, dto::AuthenticatedUser,
        error::ApplicationResult,
    },
    domain::resource::ResourceKind,
};
use tracing::info;

impl BlogCommandService {
    pub async fn delete_post(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let post = self.load(id).await?;
        ensure_owner_or_any(actor, ResourceKind::BlogPost, "delete", post.author_id)?;
        self.posts.delete(post.id).await?;
        info!(post_id = %post.id, "deleted blog post");
        Ok(())
    }
}
