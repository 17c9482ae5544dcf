// src/domain/user/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("user id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub resource: String,
    pub action: String,
}

impl Capability {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    pub fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Traveler,
    BusinessOwner,
    Staff,
}

const TRAVELER_CAPABILITIES: &[(&str, &str)] = &[
    ("blog", "create"),
    ("blog", "update:own"),
    ("blog", "delete:own"),
    ("comments", "create"),
    ("events", "create"),
    ("events", "update:own"),
    ("events", "delete:own"),
    ("reviews", "create"),
    ("reviews", "delete:own"),
    ("bookings", "create"),
    ("bookings", "cancel:own"),
];

const BUSINESS_OWNER_CAPABILITIES: &[(&str, &str)] = &[
    ("packages", "create"),
    ("packages", "update:own"),
    ("packages", "delete:own"),
    ("businesses", "create"),
    ("businesses", "update:own"),
    ("businesses", "delete:own"),
    ("destinations", "create"),
    ("destinations", "update:own"),
    ("destinations", "delete:own"),
];

const STAFF_CAPABILITIES: &[(&str, &str)] = &[
    ("blog", "update:any"),
    ("blog", "delete:any"),
    ("blog", "feature"),
    ("blog", "view:drafts"),
    ("events", "update:any"),
    ("events", "delete:any"),
    ("events", "feature"),
    ("events", "read:registrations"),
    ("packages", "update:any"),
    ("packages", "delete:any"),
    ("packages", "feature"),
    ("destinations", "update:any"),
    ("destinations", "delete:any"),
    ("destinations", "feature"),
    ("businesses", "update:any"),
    ("businesses", "delete:any"),
    ("businesses", "feature"),
    ("businesses", "verify"),
    ("reviews", "delete:any"),
    ("bookings", "confirm"),
    ("bookings", "cancel:any"),
    ("users", "create"),
    ("users", "read"),
    ("users", "update"),
];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Traveler => "traveler",
            Role::BusinessOwner => "business_owner",
            Role::Staff => "staff",
        }
    }

    pub fn default_capabilities(&self) -> HashSet<Capability> {
        let tables: &[&[(&str, &str)]] = match self {
            Role::Traveler => &[TRAVELER_CAPABILITIES],
            Role::BusinessOwner => &[TRAVELER_CAPABILITIES, BUSINESS_OWNER_CAPABILITIES],
            Role::Staff => &[
                TRAVELER_CAPABILITIES,
                BUSINESS_OWNER_CAPABILITIES,
                STAFF_CAPABILITIES,
            ],
        };
        tables
            .iter()
            .flat_map(|table| table.iter())
            .map(|(resource, action)| Capability::new(*resource, *action))
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traveler" => Ok(Role::Traveler),
            "business_owner" => Ok(Role::BusinessOwner),
            "staff" => Ok(Role::Staff),
            other => Err(DomainError::invalid("role", format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::invalid("username", "username cannot be empty"));
        }
        if value.len() < 3 {
            return Err(DomainError::invalid(
                "username",
                "username must be at least 3 characters long",
            ));
        }
        if value.len() > 150 {
            return Err(DomainError::invalid(
                "username",
                "username must be at most 150 characters long",
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
        {
            return Err(DomainError::invalid(
                "username",
                "username may only contain letters, digits and @.+-_",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_lowercase();
        let valid = value
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            })
            && !value.chars().any(char::is_whitespace);
        if !valid {
            return Err(DomainError::invalid("email", "enter a valid email address"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "password hash cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_inherit_every_lower_role_capability() {
        let staff = Role::Staff.default_capabilities();
        assert!(Role::Traveler.default_capabilities().is_subset(&staff));
        assert!(Role::BusinessOwner.default_capabilities().is_subset(&staff));
        assert!(staff.contains(&Capability::new("businesses", "verify")));
    }

    #[test]
    fn travelers_cannot_create_packages() {
        let caps = Role::Traveler.default_capabilities();
        assert!(!caps.contains(&Capability::new("packages", "create")));
        assert!(caps.contains(&Capability::new("blog", "create")));
    }

    #[test]
    fn roles_parse_from_their_names() {
        for role in [Role::Traveler, Role::BusinessOwner, Role::Staff] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn emails_are_normalised() {
        assert_eq!(Email::new(" Abebe@Example.COM ").unwrap().as_str(), "abebe@example.com");
        for bad in ["no-at-sign", "@example.com", "a@b", "a@.com", "a b@example.com"] {
            assert!(Email::new(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn usernames_reject_spaces_inside() {
        assert!(Username::new("hana_t").is_ok());
        assert_eq!(Username::new("ha na").unwrap_err().field(), Some("username"));
        assert!(Username::new("ab").is_err());
    }
}
