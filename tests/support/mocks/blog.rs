// tests/support/mocks/blog.rs
use super::catalog::Catalog;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use trailhead_core::domain::blog::{
    BlogPost, BlogPostFilter, BlogPostRepository, BlogPostUpdate, Comment, NewBlogPost,
    NewComment, PostStatus,
};
use trailhead_core::domain::cursor::ListCursor;
use trailhead_core::domain::errors::{DomainError, DomainResult};
use trailhead_core::domain::ids::{CommentId, PostId};
use trailhead_core::domain::resource::ResourceKind;
use trailhead_core::domain::slug::Slug;

pub struct InMemoryPosts {
    catalog: Arc<Catalog>,
    posts: Mutex<BTreeMap<i64, BlogPost>>,
    comments: Mutex<Vec<Comment>>,
}

impl InMemoryPosts {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            posts: Mutex::new(BTreeMap::new()),
            comments: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self, id: i64) -> Option<BlogPost> {
        self.posts.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryPosts {
    async fn insert(&self, post: NewBlogPost) -> DomainResult<BlogPost> {
        let id = self.catalog.next_id();
        self.catalog.claim_slug(ResourceKind::BlogPost, &post.slug, id)?;
        self.catalog.register(ResourceKind::BlogPost, id, post.author_id);

        let stored = BlogPost {
            id: PostId(id),
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            tags: post.tags,
            image_url: post.image_url,
            author_id: post.author_id,
            author_name: post.author_name,
            status: post.status,
            views: 0,
            read_time: post.read_time,
            featured: false,
            created_at: post.created_at,
            updated_at: post.created_at,
        };
        self.posts.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: BlogPostUpdate) -> DomainResult<BlogPost> {
        let id = i64::from(update.id);
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("blog post {id} not found")))?;

        if let Some(slug) = update.slug {
            self.catalog.claim_slug(ResourceKind::BlogPost, &slug, id)?;
            post.slug = slug;
        }
        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(excerpt) = update.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        if let Some(read_time) = update.read_time {
            post.read_time = read_time;
        }
        if let Some(tags) = update.tags {
            post.tags = tags;
        }
        if let Some(image_url) = update.image_url {
            post.image_url = image_url;
        }
        if let Some(status) = update.status {
            post.status = status;
        }
        if let Some(featured) = update.featured {
            post.featured = featured;
        }
        post.updated_at = update.updated_at;
        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let id = i64::from(id);
        self.posts
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound(format!("blog post {id} not found")))?;
        self.catalog.forget(ResourceKind::BlogPost, id);
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<BlogPost>> {
        Ok(self.get(id.into()))
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<BlogPost>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .values()
            .find(|post| post.slug == *slug)
            .cloned())
    }

    async fn list_page(
        &self,
        filter: BlogPostFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<BlogPost>, Option<ListCursor>)> {
        let posts = self.posts.lock().unwrap();
        let mut matching: Vec<BlogPost> = posts
            .values()
            .filter(|post| match filter.author {
                Some(author) => post.author_id == author,
                None => filter.include_drafts || post.status == PostStatus::Published,
            })
            .filter(|post| !filter.featured_only || post.featured)
            .filter(|post| {
                filter
                    .tag
                    .as_ref()
                    .is_none_or(|tag| post.tags.iter().any(|t| t == tag))
            })
            .filter(|post| {
                filter.search.as_ref().is_none_or(|q| {
                    let q = q.to_lowercase();
                    post.title.to_lowercase().contains(&q)
                        || post.content.to_lowercase().contains(&q)
                })
            })
            .filter(|post| {
                cursor.as_ref().is_none_or(|c| {
                    (post.created_at, i64::from(post.id)) < (c.created_at, c.id)
                })
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(super::listings::split(matching, limit, |post| {
            ListCursor::new(post.created_at, post.id.into())
        }))
    }

    async fn increment_views(&self, id: PostId) -> DomainResult<i64> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound(format!("blog post {id} not found")))?;
        post.views += 1;
        Ok(post.views)
    }

    async fn insert_comment(&self, comment: NewComment) -> DomainResult<Comment> {
        let stored = Comment {
            id: CommentId(self.catalog.next_id()),
            post_id: comment.post_id,
            user_id: comment.user_id,
            author_name: format!("user-{}", comment.user_id),
            content: comment.content,
            created_at: comment.created_at,
        };
        self.comments.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_comments(&self, post_id: PostId) -> DomainResult<Vec<Comment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}
