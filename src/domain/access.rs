// src/domain/access.rs
use std::collections::HashSet;

use crate::domain::user::value_objects::{Capability, UserId};

pub trait Specification {
    fn is_satisfied(&self) -> bool;
}

/// `{action}:any`, or `{action}:own` when the actor owns the record.
pub struct OwnerOrAnySpec<'a> {
    capabilities: &'a HashSet<Capability>,
    resource: &'a str,
    action: &'a str,
    owner_id: UserId,
    actor_id: UserId,
}

impl<'a> OwnerOrAnySpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        resource: &'a str,
        action: &'a str,
        owner_id: UserId,
        actor_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            resource,
            action,
            owner_id,
            actor_id,
        }
    }

    fn has(&self, scope: &str) -> bool {
        let action = format!("{}:{scope}", self.action);
        self.capabilities
            .iter()
            .any(|cap| cap.matches(self.resource, &action))
    }
}

impl Specification for OwnerOrAnySpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.has("any") || (self.has("own") && self.owner_id == self.actor_id)
    }
}

/// Owner of the record, or anyone holding the plain `resource:action` capability.
pub struct OwnerOrCapabilitySpec<'a> {
    capabilities: &'a HashSet<Capability>,
    resource: &'a str,
    action: &'a str,
    owner_id: UserId,
    actor_id: UserId,
}

impl<'a> OwnerOrCapabilitySpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        resource: &'a str,
        action: &'a str,
        owner_id: UserId,
        actor_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            resource,
            action,
            owner_id,
            actor_id,
        }
    }
}

impl Specification for OwnerOrCapabilitySpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.owner_id == self.actor_id
            || self
                .capabilities
                .iter()
                .any(|cap| cap.matches(self.resource, self.action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::value_objects::Role;

    #[test]
    fn owners_need_the_own_capability() {
        let caps = Role::Traveler.default_capabilities();
        let owner = UserId(7);
        assert!(OwnerOrAnySpec::new(&caps, "blog", "update", owner, owner).is_satisfied());
        assert!(!OwnerOrAnySpec::new(&caps, "blog", "update", owner, UserId(8)).is_satisfied());
        assert!(!OwnerOrAnySpec::new(&caps, "packages", "update", owner, owner).is_satisfied());
    }

    #[test]
    fn staff_act_on_anything() {
        let caps = Role::Staff.default_capabilities();
        let any = OwnerOrAnySpec::new(&caps, "events", "delete", UserId(1), UserId(2));
        assert!(any.is_satisfied());
        assert!(
            OwnerOrCapabilitySpec::new(&caps, "bookings", "confirm", UserId(1), UserId(2))
                .is_satisfied()
        );
    }

    #[test]
    fn plain_capability_or_ownership() {
        let caps = Role::BusinessOwner.default_capabilities();
        assert!(
            OwnerOrCapabilitySpec::new(&caps, "packages", "feature", UserId(3), UserId(3))
                .is_satisfied()
        );
        assert!(
            !OwnerOrCapabilitySpec::new(&caps, "packages", "feature", UserId(3), UserId(4))
                .is_satisfied()
        );
    }
}
