// src/application/commands/blog/create.rs
use super::BlogCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, BlogPostDto},
        error::ApplicationResult,
    },
    domain::{
        blog::{
            NewBlogPost, PostStatus,
            entity::{MAX_TITLE_LEN, excerpt_from, normalize_tags},
        },
        derived::ReadTime,
        errors::DomainError,
        resource::ResourceKind,
        validation::{ensure_max_len, required_text},
    },
};
use tracing::info;

pub struct CreatePostCommand {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub status: Option<PostStatus>,
}

impl BlogCommandService {
    pub async fn create_post(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePostCommand,
    ) -> ApplicationResult<BlogPostDto> {
        ensure_capability(actor, "blog", "create")?;

        let title = required_text("title", command.title, MAX_TITLE_LEN)?;
        if let Some(url) = command.image_url.as_deref() {
            ensure_max_len("image_url", url, 500)?;
        }
        let slug = self.slugs.assign(ResourceKind::BlogPost, &title, None).await?;
        let read_time = ReadTime::from_content(&command.content)?;
        let excerpt = command
            .excerpt
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| excerpt_from(&command.content));

        let new_post = NewBlogPost {
            title,
            slug,
            excerpt,
            content: command.content,
            tags: normalize_tags(command.tags),
            image_url: command.image_url,
            author_id: actor.id,
            author_name: actor.username.clone(),
            status: command.status.unwrap_or_default(),
            read_time,
            created_at: self.clock.now(),
        };

        let post = match self.posts.insert(new_post.clone()).await {
            Err(DomainError::DuplicateSlug) => {
                info!(slug = %new_post.slug, "blog slug taken at insert, retrying once");
                let slug = self
                    .slugs
                    .assign_disambiguated(ResourceKind::BlogPost, &new_post.title, None)
                    .await?;
                self.posts.insert(NewBlogPost { slug, ..new_post }).await?
            }
            other => other?,
        };
        info!(post_id = %post.id, author = %post.author_id, "created blog post");

        Ok(post.into())
    }
}
