// src/application/commands/blog/mod.rs
mod create;
mod delete;
mod engagement;
mod service;
mod update;

pub use create::CreatePostCommand;
pub use engagement::AddCommentCommand;
pub use service::BlogCommandService;
pub use update::UpdatePostCommand;
