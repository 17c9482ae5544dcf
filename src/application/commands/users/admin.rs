// src/application/commands/users/admin.rs
use super::UserCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Role, User, UserId, UserUpdate},
};
use tracing::info;

impl UserCommandService {
    pub async fn toggle_active(
        &self,
        actor: &AuthenticatedUser,
        user_id: i64,
    ) -> ApplicationResult<UserDto> {
        let user = self.load_for_admin(actor, user_id).await?;
        if user.id == actor.id {
            return Err(ApplicationError::validation(
                "you cannot deactivate your own account",
            ));
        }

        let update = UserUpdate::new(user.id).with_is_active(!user.is_active);
        let updated = self.user_repo.update(update).await?;
        info!(user_id = %updated.id, active = updated.is_active, "toggled user activity");
        Ok(updated.into())
    }

    /// Staff lose the role back to traveler; anyone else becomes staff.
    pub async fn toggle_staff(
        &self,
        actor: &AuthenticatedUser,
        user_id: i64,
    ) -> ApplicationResult<UserDto> {
        let user = self.load_for_admin(actor, user_id).await?;
        if user.id == actor.id {
            return Err(ApplicationError::validation(
                "you cannot change your own staff status",
            ));
        }

        let role = if user.is_staff() {
            Role::Traveler
        } else {
            Role::Staff
        };
        let updated = self
            .user_repo
            .update(UserUpdate::new(user.id).with_role(role))
            .await?;
        info!(user_id = %updated.id, role = %updated.role, "toggled staff role");
        Ok(updated.into())
    }

    async fn load_for_admin(
        &self,
        actor: &AuthenticatedUser,
        user_id: i64,
    ) -> ApplicationResult<User> {
        ensure_capability(actor, "users", "update")?;
        let user_id = UserId::new(user_id)?;
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::missing("user", user_id))
    }
}
