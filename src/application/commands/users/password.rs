// src/application/commands/users/password.rs
use crate::domain::errors::{DomainError, DomainResult};

pub(super) const MIN_PASSWORD_LENGTH: usize = 12;

pub(super) fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::invalid(
            "password",
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }

    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if !(has_uppercase && has_lowercase && has_digit && has_special) {
        return Err(DomainError::invalid(
            "password",
            "password must contain uppercase, lowercase, digit, and special character",
        ));
    }

    Ok(())
}

pub(super) fn ensure_confirmation(password: &str, confirmation: &str) -> DomainResult<()> {
    if password != confirmation {
        return Err(DomainError::invalid(
            "password_confirmation",
            "password fields didn't match",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_passes() {
        assert!(validate_password("Lalibela#2024").is_ok());
    }

    #[test]
    fn weak_passwords_name_the_field() {
        for weak in ["Short#1", "alllowercase#123", "NoDigitsHere!!", "NoSpecial12345"] {
            let err = validate_password(weak).unwrap_err();
            assert_eq!(err.field(), Some("password"), "{weak} accepted");
        }
    }

    #[test]
    fn confirmation_must_match() {
        assert!(ensure_confirmation("a", "a").is_ok());
        assert_eq!(
            ensure_confirmation("a", "b").unwrap_err().field(),
            Some("password_confirmation")
        );
    }
}
