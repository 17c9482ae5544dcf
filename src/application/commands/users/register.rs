// src/application/commands/users/register.rs
use super::{
    UserCommandService,
    password::{ensure_confirmation, validate_password},
};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, NewUser, PasswordHash, Role, User, Username},
};
use tracing::info;

pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: Option<Role>,
}

impl UserCommandService {
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;
        ensure_confirmation(&command.password, &command.password_confirmation)?;

        let existing = self.user_repo.count().await?;
        let role = determine_role(existing, actor, command.role)?;

        self.ensure_identity_available(&username, &email).await?;

        let user = self
            .create_and_insert_user(username, email, &command.password, role)
            .await?;
        info!(user_id = %user.id, role = %user.role, "registered user");

        Ok(user.into())
    }

    async fn ensure_identity_available(
        &self,
        username: &Username,
        email: &Email,
    ) -> ApplicationResult<()> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(ApplicationError::conflict("email already exists"));
        }
        Ok(())
    }

    async fn create_and_insert_user(
        &self,
        username: Username,
        email: Email,
        password: &str,
        role: Role,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser::new(username, email, password_hash, role, self.clock.now());
        Ok(self.user_repo.insert(new_user).await?)
    }
}

/// The very first account is staff. Afterwards anyone may sign up as a
/// traveler or business owner, but only staff can hand out the staff role.
fn determine_role(
    existing: u64,
    actor: Option<&AuthenticatedUser>,
    requested: Option<Role>,
) -> ApplicationResult<Role> {
    if existing == 0 {
        return Ok(Role::Staff);
    }
    match requested.unwrap_or_default() {
        Role::Staff => {
            let requester = actor.ok_or_else(|| {
                ApplicationError::forbidden("only staff may create staff accounts")
            })?;
            ensure_capability(requester, "users", "create")?;
            Ok(Role::Staff)
        }
        role => Ok(role),
    }
}
