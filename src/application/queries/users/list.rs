// src/application/queries/users/list.rs
use super::UserQueryService;
use crate::application::{
    commands::capability::ensure_capability,
    dto::{AuthenticatedUser, CursorPage, UserDto},
    error::ApplicationResult,
    queries::listing::PageRequest,
};

pub struct ListUsersQuery {
    pub page: PageRequest,
    pub q: Option<String>,
}

impl UserQueryService {
    pub async fn list_users(
        &self,
        actor: &AuthenticatedUser,
        query: ListUsersQuery,
    ) -> ApplicationResult<CursorPage<UserDto>> {
        ensure_capability(actor, "users", "read")?;

        let (limit, cursor) = query.page.resolve()?;
        let (users, next_cursor) = self
            .user_repo
            .list_page(limit, cursor, query.q.as_deref())
            .await?;

        Ok(CursorPage::from_page(users, next_cursor))
    }
}
