// src/domain/ids.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> DomainResult<Self> {
                if id <= 0 {
                    Err(DomainError::Validation(concat!($label, " id must be positive").into()))
                } else {
                    Ok(Self(id))
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(PostId, "post");
record_id!(CommentId, "comment");
record_id!(PackageId, "package");
record_id!(DepartureId, "departure");
record_id!(EventId, "event");
record_id!(RegistrationId, "registration");
record_id!(DestinationId, "destination");
record_id!(BusinessId, "business");
record_id!(BookingId, "booking");
record_id!(ReviewId, "review");
record_id!(SavedItemId, "saved item");
