// src/infrastructure/security/claims.rs
//! Reads the authority facts of a verified biscuit back into an [`AuthenticatedUser`].
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

#[derive(Default)]
struct Claims {
    user: Option<(i64, String)>,
    role: Option<Role>,
    issued_at: Option<u64>,
    expires_at: Option<u64>,
    rights: HashSet<Capability>,
}

impl Claims {
    fn absorb(&mut self, predicate: Predicate) {
        match (predicate.name.as_str(), predicate.terms.as_slice()) {
            ("user", [Term::Integer(id), Term::Str(name)]) => {
                self.user = Some((*id, name.clone()));
            }
            ("role", [Term::Str(name)]) => self.role = name.parse().ok(),
            ("issued_at", [Term::Date(secs)]) => self.issued_at = Some(*secs),
            ("expires_at", [Term::Date(secs)]) => self.expires_at = Some(*secs),
            ("right", [Term::Str(resource), Term::Str(action)]) => {
                self.rights
                    .insert(Capability::new(resource.clone(), action.clone()));
            }
            _ => {}
        }
    }

    fn into_user(self) -> ApplicationResult<AuthenticatedUser> {
        let (id, username) = self
            .user
            .ok_or_else(|| ApplicationError::unauthorized("token has no user"))?;
        let role = self
            .role
            .ok_or_else(|| ApplicationError::unauthorized("token has no role"))?;
        let issued_at = timestamp(self.issued_at, "issued_at")?;
        let expires_at = timestamp(self.expires_at, "expires_at")?;

        let mut capabilities = role.default_capabilities();
        capabilities.extend(self.rights);

        Ok(AuthenticatedUser {
            id: UserId::new(id).map_err(ApplicationError::from)?,
            username,
            role,
            capabilities,
            issued_at,
            expires_at,
        })
    }
}

fn timestamp(secs: Option<u64>, name: &str) -> ApplicationResult<DateTime<Utc>> {
    secs.and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| ApplicationError::unauthorized(format!("token has no valid {name}")))
}

pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let mut claims = Claims::default();
    for fact in facts {
        claims.absorb(fact.predicate);
    }
    claims.into_user()
}
