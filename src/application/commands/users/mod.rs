// src/application/commands/users/mod.rs
mod admin;
mod change_password;
mod login;
mod password;
mod register;
mod service;

pub use change_password::ChangePasswordCommand;
pub use login::{LoginResult, LoginUserCommand};
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
