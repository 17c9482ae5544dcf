// src/domain/resource.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{Disambiguator, SlugPolicy, SlugRules};
use crate::domain::user::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Every record family exposed by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    BlogPost,
    Package,
    Event,
    Destination,
    Business,
    Booking,
}

/// Who may flip the `featured` flag of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureAuthority {
    StaffOnly,
    OwnerOrStaff,
    NotFeaturable,
}

/// Per-kind behaviour consulted by both the create and the update paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceProfile {
    /// Capability namespace, also used in error messages.
    pub resource: &'static str,
    pub label: &'static str,
    pub slug: Option<SlugRules>,
    pub reviewable: bool,
    pub saveable: bool,
    pub bookable: bool,
    pub feature: FeatureAuthority,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::BlogPost,
        ResourceKind::Package,
        ResourceKind::Event,
        ResourceKind::Destination,
        ResourceKind::Business,
        ResourceKind::Booking,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::BlogPost => "blog_post",
            ResourceKind::Package => "package",
            ResourceKind::Event => "event",
            ResourceKind::Destination => "destination",
            ResourceKind::Business => "business",
            ResourceKind::Booking => "booking",
        }
    }

    pub const fn profile(self) -> ResourceProfile {
        match self {
            ResourceKind::BlogPost => ResourceProfile {
                resource: "blog",
                label: "blog post",
                slug: Some(SlugRules {
                    policy: SlugPolicy::RegenerateOnTitleChange,
                    disambiguator: Disambiguator::RandomSuffix,
                }),
                reviewable: false,
                saveable: true,
                bookable: false,
                feature: FeatureAuthority::StaffOnly,
            },
            ResourceKind::Package => ResourceProfile {
                resource: "packages",
                label: "package",
                slug: Some(SlugRules {
                    policy: SlugPolicy::Immutable,
                    disambiguator: Disambiguator::RandomSuffix,
                }),
                reviewable: true,
                saveable: true,
                bookable: true,
                feature: FeatureAuthority::OwnerOrStaff,
            },
            ResourceKind::Event => ResourceProfile {
                resource: "events",
                label: "event",
                slug: Some(SlugRules {
                    policy: SlugPolicy::Immutable,
                    disambiguator: Disambiguator::Timestamp,
                }),
                reviewable: true,
                saveable: true,
                bookable: true,
                feature: FeatureAuthority::StaffOnly,
            },
            ResourceKind::Destination => ResourceProfile {
                resource: "destinations",
                label: "destination",
                slug: Some(SlugRules {
                    policy: SlugPolicy::Immutable,
                    disambiguator: Disambiguator::RandomSuffix,
                }),
                reviewable: true,
                saveable: true,
                bookable: false,
                feature: FeatureAuthority::StaffOnly,
            },
            ResourceKind::Business => ResourceProfile {
                resource: "businesses",
                label: "business",
                slug: Some(SlugRules {
                    policy: SlugPolicy::RegenerateOnTitleChange,
                    disambiguator: Disambiguator::Timestamp,
                }),
                reviewable: true,
                saveable: true,
                bookable: false,
                feature: FeatureAuthority::StaffOnly,
            },
            ResourceKind::Booking => ResourceProfile {
                resource: "bookings",
                label: "booking",
                slug: None,
                reviewable: false,
                saveable: false,
                bookable: false,
                feature: FeatureAuthority::NotFeaturable,
            },
        }
    }

    pub fn ensure_reviewable(self) -> Result<(), DomainError> {
        if self.profile().reviewable {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "{} records cannot be reviewed",
                self.profile().label
            )))
        }
    }

    pub fn ensure_saveable(self) -> Result<(), DomainError> {
        if self.profile().saveable {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "{} records cannot be saved",
                self.profile().label
            )))
        }
    }

    pub fn ensure_bookable(self) -> Result<(), DomainError> {
        if self.profile().bookable {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "{} records cannot be booked",
                self.profile().label
            )))
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown resource kind '{s}'")))
    }
}

/// Existence and ownership of any record, addressed by kind and id.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// Owner of the record, or `None` when it does not exist.
    async fn owner_of(&self, kind: ResourceKind, id: i64) -> DomainResult<Option<UserId>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_their_names() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn bookings_have_no_slug_and_cannot_be_reviewed() {
        let profile = ResourceKind::Booking.profile();
        assert!(profile.slug.is_none());
        assert!(ResourceKind::Booking.ensure_reviewable().is_err());
        assert!(ResourceKind::BlogPost.ensure_reviewable().is_err());
        assert!(ResourceKind::Event.ensure_reviewable().is_ok());
    }

    #[test]
    fn slug_policies_differ_per_kind() {
        let post = ResourceKind::BlogPost.profile().slug.unwrap();
        let event = ResourceKind::Event.profile().slug.unwrap();
        assert_eq!(post.policy, SlugPolicy::RegenerateOnTitleChange);
        assert_eq!(event.policy, SlugPolicy::Immutable);
        assert_eq!(event.disambiguator, Disambiguator::Timestamp);
    }
}
