// src/domain/blog/repository.rs
use crate::domain::blog::entity::{BlogPost, BlogPostUpdate, Comment, NewBlogPost, NewComment};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::DomainResult;
use crate::domain::ids::PostId;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct BlogPostFilter {
    pub include_drafts: bool,
    /// Only this author's posts, drafts included.
    pub author: Option<UserId>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub featured_only: bool,
}

#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Fails with `DuplicateSlug` when the slug index rejects the row.
    async fn insert(&self, post: NewBlogPost) -> DomainResult<BlogPost>;
    async fn update(&self, update: BlogPostUpdate) -> DomainResult<BlogPost>;
    async fn delete(&self, id: PostId) -> DomainResult<()>;
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<BlogPost>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<BlogPost>>;
    async fn list_page(
        &self,
        filter: BlogPostFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<BlogPost>, Option<ListCursor>)>;
    /// Atomic `views = views + 1`; returns the new count.
    async fn increment_views(&self, id: PostId) -> DomainResult<i64>;
    async fn insert_comment(&self, comment: NewComment) -> DomainResult<Comment>;
    async fn list_comments(&self, post_id: PostId) -> DomainResult<Vec<Comment>>;
}
