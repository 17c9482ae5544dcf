// src/application/error.rs
use crate::domain::errors::DomainError;
use std::fmt::Display;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Failures surfaced by the command and query services.
///
/// Rule violations raised by entities travel as [`ApplicationError::Domain`];
/// the remaining variants are produced by the services themselves.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("authentication required: {0}")]
    Unauthorized(String),

    #[error("not permitted: {0}")]
    Forbidden(String),

    /// Hashing, token or worker failures. Never shown to clients verbatim.
    #[error("internal failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// `NotFound` naming the record kind and id, e.g. `event 7 not found`.
    pub fn missing(label: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{label} {id} not found"))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Input field the failure points at, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Domain(err) => err.field(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_is_carried_through_from_the_domain() {
        let err: ApplicationError = DomainError::invalid("title", "cannot be empty").into();
        assert_eq!(err.field(), Some("title"));
        assert_eq!(ApplicationError::missing("event", 7).field(), None);
    }

    #[test]
    fn missing_names_kind_and_id() {
        let err = ApplicationError::missing("destination", 12);
        assert_eq!(err.to_string(), "not found: destination 12 not found");
    }
}
