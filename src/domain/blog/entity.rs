// src/domain/blog/entity.rs
use crate::domain::derived::ReadTime;
use crate::domain::errors::DomainError;
use crate::domain::ids::{CommentId, PostId};
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MAX_TITLE_LEN: usize = 200;
pub const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::invalid("status", format!("unknown post status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub author_id: UserId,
    pub author_name: String,
    pub status: PostStatus,
    pub views: i64,
    pub read_time: ReadTime,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: Slug,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub author_id: UserId,
    pub author_name: String,
    pub status: PostStatus,
    pub read_time: ReadTime,
    pub created_at: DateTime<Utc>,
}

/// Excerpt used when the author did not write one: the leading words of the content.
pub fn excerpt_from(content: &str) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= EXCERPT_CHARS {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(EXCERPT_CHARS).collect();
    let trimmed = match cut.rfind(' ') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{trimmed}...")
}

/// Normalises tags: trimmed, lowercased, blanks and duplicates dropped, order kept.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

#[derive(Debug, Clone)]
pub struct BlogPostUpdate {
    pub id: PostId,
    pub title: Option<String>,
    pub slug: Option<Slug>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub read_time: Option<ReadTime>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<Option<String>>,
    pub status: Option<PostStatus>,
    pub featured: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPostUpdate {
    pub fn new(id: PostId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            excerpt: None,
            content: None,
            read_time: None,
            tags: None,
            image_url: None,
            status: None,
            featured: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    /// Content and its read time always travel together.
    pub fn with_content(mut self, content: String, read_time: ReadTime) -> Self {
        self.content = Some(content);
        self.read_time = Some(read_time);
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_its_own_excerpt() {
        assert_eq!(excerpt_from("  Coffee   in\nHarar "), "Coffee in Harar");
    }

    #[test]
    fn long_content_is_cut_on_a_word_boundary() {
        let content = "injera ".repeat(100);
        let excerpt = excerpt_from(&content);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.chars().count() <= EXCERPT_CHARS + 3);
        assert!(!excerpt.contains("injer..."));
    }

    #[test]
    fn tags_are_deduplicated_case_insensitively() {
        let tags = normalize_tags(vec![
            "Hiking".into(),
            " hiking ".into(),
            "".into(),
            "Coffee".into(),
        ]);
        assert_eq!(tags, vec!["hiking".to_string(), "coffee".to_string()]);
    }

    #[test]
    fn status_defaults_to_draft() {
        assert_eq!(PostStatus::default(), PostStatus::Draft);
        assert_eq!("published".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert!("archived".parse::<PostStatus>().is_err());
    }
}
