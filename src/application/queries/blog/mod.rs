// src/application/queries/blog/mod.rs
mod get;
mod list;
mod service;

pub use list::ListPostsQuery;
pub use service::BlogQueryService;
pub(crate) use service::is_visible;
