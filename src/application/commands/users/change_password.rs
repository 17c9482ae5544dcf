// src/application/commands/users/change_password.rs
use super::{
    UserCommandService,
    password::{ensure_confirmation, validate_password},
};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{PasswordHash, User, UserId, UserUpdate},
};

pub struct ChangePasswordCommand {
    pub user_id: i64,
    pub current_password: Option<String>,
    pub new_password: String,
    pub new_password_confirmation: String,
}

impl UserCommandService {
    pub async fn change_password(
        &self,
        actor: &AuthenticatedUser,
        command: ChangePasswordCommand,
    ) -> ApplicationResult<()> {
        let target_id = UserId::new(command.user_id)?;

        let user = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ApplicationError::missing("user", target_id))?;

        self.verify_change_password_self(actor, &user, command.current_password.as_deref())
            .await?;

        validate_password(&command.new_password)?;
        ensure_confirmation(&command.new_password, &command.new_password_confirmation)?;

        let hashed = self.password_hasher.hash(&command.new_password).await?;
        let update = UserUpdate::new(target_id).with_password_hash(PasswordHash::new(hashed)?);
        self.user_repo.update(update).await?;

        Ok(())
    }

    async fn verify_change_password_self(
        &self,
        actor: &AuthenticatedUser,
        user: &User,
        current_password: Option<&str>,
    ) -> ApplicationResult<()> {
        if actor.id != user.id {
            return ensure_capability(actor, "users", "update");
        }

        let current = current_password
            .ok_or_else(|| ApplicationError::validation("current password is required"))?;

        self.password_hasher
            .verify(current, user.password_hash.as_str())
            .await
    }
}
