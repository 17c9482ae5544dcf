// src/application/commands/blog/update.rs
use super::BlogCommandService;
use crate::{
    application::{
        commands::capability::ensure_owner_or_any,
        dto::{AuthenticatedUser, BlogPostDto},
        error::ApplicationResult,
    },
    domain::{
        blog::{
            BlogPostUpdate, PostStatus,
            entity::{MAX_TITLE_LEN, normalize_tags},
        },
        derived::ReadTime,
        errors::DomainError,
        resource::ResourceKind,
        validation::{ensure_max_len, required_text},
    },
};
use tracing::info;

#[derive(Default)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub status: Option<PostStatus>,
}

impl BlogCommandService {
    pub async fn update_post(
        &self,
        actor: &AuthenticatedUser,
        command: UpdatePostCommand,
    ) -> ApplicationResult<BlogPostDto> {
        let post = self.load(command.id).await?;
        ensure_owner_or_any(actor, ResourceKind::BlogPost, "update", post.author_id)?;

        let mut update = BlogPostUpdate::new(post.id, self.clock.now());

        if let Some(title) = command.title {
            let title = required_text("title", title, MAX_TITLE_LEN)?;
            if let Some(slug) = self
                .slugs
                .reassign_on_update(
                    ResourceKind::BlogPost,
                    &post.title,
                    Some(&title),
                    post.id.into(),
                )
                .await?
            {
                update = update.with_slug(slug);
            }
            update = update.with_title(title);
        }
        if let Some(content) = command.content {
            let read_time = ReadTime::from_content(&content)?;
            update = update.with_content(content, read_time);
        }
        if let Some(excerpt) = command.excerpt {
            update.excerpt = Some(required_text("excerpt", excerpt, 500)?);
        }
        if let Some(url) = command.image_url {
            ensure_max_len("image_url", &url, 500)?;
            update.image_url = Some(Some(url));
        }
        update.tags = command.tags.map(normalize_tags);
        update.status = command.status;

        let updated = match self.posts.update(update.clone()).await {
            Err(DomainError::DuplicateSlug) if update.slug.is_some() => {
                let title = update.title.clone().unwrap_or_else(|| post.title.clone());
                info!(post_id = %post.id, "blog slug taken at update, retrying once");
                let slug = self
                    .slugs
                    .assign_disambiguated(ResourceKind::BlogPost, &title, Some(post.id.into()))
                    .await?;
                self.posts.update(update.with_slug(slug)).await?
            }
            other => other?,
        };

        Ok(updated.into())
    }
}
