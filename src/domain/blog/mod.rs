// src/domain/blog/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{BlogPost, BlogPostUpdate, Comment, NewBlogPost, NewComment, PostStatus};
pub use repository::{BlogPostFilter, BlogPostRepository};
