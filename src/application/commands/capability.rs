// src/application/commands/capability.rs
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        access::{OwnerOrAnySpec, OwnerOrCapabilitySpec, Specification},
        resource::{FeatureAuthority, ResourceKind},
        user::UserId,
    },
};

pub(crate) fn ensure_capability(
    user: &AuthenticatedUser,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if user.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}

/// `{action}:any`, or `{action}:own` on a record the actor owns.
pub(crate) fn ensure_owner_or_any(
    user: &AuthenticatedUser,
    kind: ResourceKind,
    action: &str,
    owner_id: UserId,
) -> ApplicationResult<()> {
    let profile = kind.profile();
    let spec = OwnerOrAnySpec::new(&user.capabilities, profile.resource, action, owner_id, user.id);
    if spec.is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "not allowed to {action} this {}",
            profile.label
        )))
    }
}

/// Who may flip `featured` is part of the per-kind profile.
pub(crate) fn ensure_can_feature(
    user: &AuthenticatedUser,
    kind: ResourceKind,
    owner_id: UserId,
) -> ApplicationResult<()> {
    let profile = kind.profile();
    match profile.feature {
        FeatureAuthority::StaffOnly => ensure_capability(user, profile.resource, "feature"),
        FeatureAuthority::OwnerOrStaff => {
            ensure_owner_or_capability(user, kind, "feature", owner_id)
        }
        FeatureAuthority::NotFeaturable => Err(ApplicationError::validation(format!(
            "{} records cannot be featured",
            profile.label
        ))),
    }
}

/// Ownership, or the plain `resource:action` capability.
pub(crate) fn ensure_owner_or_capability(
    user: &AuthenticatedUser,
    kind: ResourceKind,
    action: &str,
    owner_id: UserId,
) -> ApplicationResult<()> {
    let profile = kind.profile();
    let spec =
        OwnerOrCapabilitySpec::new(&user.capabilities, profile.resource, action, owner_id, user.id);
    if spec.is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "only the owner or staff may {action} this {}",
            profile.label
        )))
    }
}
