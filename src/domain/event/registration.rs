// src/domain/event/registration.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::{EventId, RegistrationId};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            other => Err(DomainError::invalid(
                "status",
                format!("unknown registration status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    pub fn ensure_not_confirmed(&self) -> DomainResult<()> {
        if self.status == RegistrationStatus::Confirmed {
            return Err(DomainError::Conflict(
                "already registered for this event".into(),
            ));
        }
        Ok(())
    }

    pub fn ensure_cancellable(&self) -> DomainResult<()> {
        if self.status == RegistrationStatus::Cancelled {
            return Err(DomainError::Conflict(
                "registration is already cancelled".into(),
            ));
        }
        Ok(())
    }
}

/// `currentAttendees`: how many registrations are confirmed.
pub fn confirmed_attendees<'a, I>(registrations: I) -> i32
where
    I: IntoIterator<Item = &'a Registration>,
{
    let count = registrations
        .into_iter()
        .filter(|r| r.status == RegistrationStatus::Confirmed)
        .count();
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn registration(user: i64, status: RegistrationStatus) -> Registration {
        Registration {
            id: RegistrationId(user),
            event_id: EventId(1),
            user_id: UserId(user),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn only_confirmed_registrations_count() {
        let regs = vec![
            registration(1, RegistrationStatus::Confirmed),
            registration(2, RegistrationStatus::Cancelled),
            registration(3, RegistrationStatus::Confirmed),
        ];
        assert_eq!(confirmed_attendees(&regs), 2);
        assert_eq!(confirmed_attendees(&Vec::new()), 0);
    }

    #[test]
    fn cancelling_twice_is_a_conflict() {
        let reg = registration(1, RegistrationStatus::Cancelled);
        assert!(matches!(reg.ensure_cancellable(), Err(DomainError::Conflict(_))));
        assert!(reg.ensure_not_confirmed().is_ok());
    }
}
