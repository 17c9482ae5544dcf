// src/application/queries/blog/list.rs
use super::BlogQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, BlogPostDto, CursorPage},
        error::{ApplicationError, ApplicationResult},
        queries::listing::{PageRequest, non_blank},
    },
    domain::blog::BlogPostFilter,
};

#[derive(Debug, Clone, Default)]
pub struct ListPostsQuery {
    pub page: PageRequest,
    pub q: Option<String>,
    pub tag: Option<String>,
    pub featured_only: bool,
    /// Include drafts of every author; needs `blog:view:drafts`.
    pub include_drafts: bool,
    /// Only the viewer's own posts, drafts included.
    pub mine: bool,
}

impl BlogQueryService {
    pub async fn list_posts(
        &self,
        viewer: Option<&AuthenticatedUser>,
        query: ListPostsQuery,
    ) -> ApplicationResult<CursorPage<BlogPostDto>> {
        let (limit, cursor) = query.page.resolve()?;

        let author = if query.mine {
            let user = viewer
                .ok_or_else(|| ApplicationError::unauthorized("sign in to list your posts"))?;
            Some(user.id)
        } else {
            None
        };
        let include_drafts = query.include_drafts
            && viewer.is_some_and(|user| user.has_capability("blog", "view:drafts"));

        let filter = BlogPostFilter {
            include_drafts,
            author,
            search: non_blank(query.q),
            tag: query.tag.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty()),
            featured_only: query.featured_only,
        };

        let (posts, next) = self.posts.list_page(filter, limit, cursor).await?;
        Ok(CursorPage::from_page(posts, next))
    }
}
