// src/infrastructure/repositories/postgres_blog.rs
use super::{
    map_sqlx,
    support::{Conditions, order_and_limit, split_page},
};
use crate::domain::blog::{
    BlogPost, BlogPostFilter, BlogPostRepository, BlogPostUpdate, Comment, NewBlogPost,
    NewComment, PostStatus,
};
use crate::domain::cursor::ListCursor;
use crate::domain::derived::ReadTime;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::{CommentId, PostId};
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const POST_COLUMNS: &str = "id, title, slug, excerpt, content, tags, image_url, author_id, \
     author_name, status, views, read_time, featured, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresBlogPostRepository {
    pool: PgPool,
}

impl PostgresBlogPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    excerpt: String,
    content: String,
    tags: Vec<String>,
    image_url: Option<String>,
    author_id: i64,
    author_name: String,
    status: String,
    views: i64,
    read_time: i32,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for BlogPost {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(BlogPost {
            id: PostId::new(row.id)?,
            title: row.title,
            slug: Slug::new(row.slug)?,
            excerpt: row.excerpt,
            content: row.content,
            tags: row.tags,
            image_url: row.image_url,
            author_id: UserId::new(row.author_id)?,
            author_name: row.author_name,
            status: row.status.parse()?,
            views: row.views,
            read_time: ReadTime::from_minutes(row.read_time)?,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    author_name: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::new(row.id)?,
            post_id: PostId::new(row.post_id)?,
            user_id: UserId::new(row.user_id)?,
            author_name: row.author_name,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn insert(&self, post: NewBlogPost) -> DomainResult<BlogPost> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO blog_posts (title, slug, excerpt, content, tags, image_url, author_id,
                 author_name, status, read_time, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
             RETURNING {POST_COLUMNS}"
        ))
        .bind(post.title)
        .bind(String::from(post.slug))
        .bind(post.excerpt)
        .bind(post.content)
        .bind(post.tags)
        .bind(post.image_url)
        .bind(i64::from(post.author_id))
        .bind(post.author_name)
        .bind(post.status.as_str())
        .bind(post.read_time.minutes() as i32)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        BlogPost::try_from(row)
    }

    async fn update(&self, update: BlogPostUpdate) -> DomainResult<BlogPost> {
        let BlogPostUpdate {
            id,
            title,
            slug,
            excerpt,
            content,
            read_time,
            tags,
            image_url,
            status,
            featured,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE blog_posts SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ").push_bind(title);
        }
        if let Some(slug) = slug {
            builder.push(", slug = ").push_bind(String::from(slug));
        }
        if let Some(excerpt) = excerpt {
            builder.push(", excerpt = ").push_bind(excerpt);
        }
        if let Some(content) = content {
            builder.push(", content = ").push_bind(content);
        }
        if let Some(read_time) = read_time {
            builder
                .push(", read_time = ")
                .push_bind(read_time.minutes() as i32);
        }
        if let Some(tags) = tags {
            builder.push(", tags = ").push_bind(tags);
        }
        if let Some(image_url) = image_url {
            builder.push(", image_url = ").push_bind(image_url);
        }
        if let Some(status) = status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(featured) = featured {
            builder.push(", featured = ").push_bind(featured);
        }

        builder.push(" WHERE id = ").push_bind(i64::from(id));
        builder.push(format!(" RETURNING {POST_COLUMNS}"));

        let row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("blog post {id} not found")))?;

        BlogPost::try_from(row)
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        super::delete_with_dependents(&self.pool, "blog_posts", "blog_post", id.into()).await
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<BlogPost>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(BlogPost::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<BlogPost>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(BlogPost::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: BlogPostFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<BlogPost>, Option<ListCursor>)> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM blog_posts"));
        let mut conditions = Conditions::default();

        match filter.author {
            Some(author) => {
                conditions
                    .next(&mut builder)
                    .push("author_id = ")
                    .push_bind(i64::from(author));
            }
            None if !filter.include_drafts => {
                conditions
                    .next(&mut builder)
                    .push("status = ")
                    .push_bind(PostStatus::Published.as_str());
            }
            None => {}
        }
        if let Some(tag) = filter.tag {
            conditions
                .next(&mut builder)
                .push_bind(tag)
                .push(" = ANY(tags)");
        }
        if filter.featured_only {
            conditions.next(&mut builder).push("featured = TRUE");
        }
        conditions.search(&mut builder, &["title", "excerpt", "content"], filter.search);
        conditions.cursor(&mut builder, cursor);
        order_and_limit(&mut builder, limit);

        let posts = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(BlogPost::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(split_page(posts, limit, |post| {
            ListCursor::new(post.created_at, post.id.into())
        }))
    }

    async fn increment_views(&self, id: PostId) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE blog_posts SET views = views + 1 WHERE id = $1 RETURNING views",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("blog post {id} not found")))
    }

    async fn insert_comment(&self, comment: NewComment) -> DomainResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            "WITH inserted AS (
                 INSERT INTO blog_comments (post_id, user_id, content, created_at)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, post_id, user_id, content, created_at
             )
             SELECT inserted.id, inserted.post_id, inserted.user_id,
                    users.username AS author_name, inserted.content, inserted.created_at
             FROM inserted JOIN users ON users.id = inserted.user_id",
        )
        .bind(i64::from(comment.post_id))
        .bind(i64::from(comment.user_id))
        .bind(comment.content)
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Comment::try_from(row)
    }

    async fn list_comments(&self, post_id: PostId) -> DomainResult<Vec<Comment>> {
        sqlx::query_as::<_, CommentRow>(
            "SELECT c.id, c.post_id, c.user_id, u.username AS author_name, c.content, c.created_at
             FROM blog_comments c JOIN users u ON u.id = c.user_id
             WHERE c.post_id = $1
             ORDER BY c.created_at, c.id",
        )
        .bind(i64::from(post_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Comment::try_from)
        .collect()
    }
}
