// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use trailhead_core::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use trailhead_core::domain::user::{Role, UserId};

pub const TRAVELER_TOKEN: &str = "traveler-token";
pub const OTHER_TRAVELER_TOKEN: &str = "other-traveler-token";
pub const STAFF_TOKEN: &str = "staff-token";
pub const BUSINESS_OWNER_TOKEN: &str = "business-owner-token";

fn principal(id: i64, username: &str, role: Role) -> AuthenticatedUser {
    let now = super::time::fixed_now();
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        username: username.into(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

pub fn traveler() -> AuthenticatedUser {
    principal(10, "amara", Role::Traveler)
}

pub fn other_traveler() -> AuthenticatedUser {
    principal(11, "biniam", Role::Traveler)
}

/// A traveler with an arbitrary id, for scenarios with many distinct users.
pub fn traveler_numbered(id: i64) -> AuthenticatedUser {
    principal(id, &format!("traveler-{id}"), Role::Traveler)
}

pub fn business_owner() -> AuthenticatedUser {
    principal(20, "hanna", Role::BusinessOwner)
}

pub fn staff() -> AuthenticatedUser {
    principal(1, "selam", Role::Staff)
}

/// Resolves the fixed test tokens to their principals.
#[derive(Clone, Debug, Default)]
pub struct StubTokenManager;

#[async_trait]
impl TokenManager for StubTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: format!("token-{}", subject.user_id),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            TRAVELER_TOKEN => Ok(traveler()),
            OTHER_TRAVELER_TOKEN => Ok(other_traveler()),
            STAFF_TOKEN => Ok(staff()),
            BUSINESS_OWNER_TOKEN => Ok(business_owner()),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

/// Stores `hash::<password>` so verification stays observable.
#[derive(Clone, Debug, Default)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hash::{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if format!("hash::{password}") == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}
