// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

const CNT_BLOG_SLUG: &str = "blog_posts_slug_key";
const CNT_PACKAGE_SLUG: &str = "packages_slug_key";
const CNT_EVENT_SLUG: &str = "events_slug_key";
const CNT_DESTINATION_SLUG: &str = "destinations_slug_key";
const CNT_BUSINESS_SLUG: &str = "businesses_slug_key";
const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_REVIEW_ONCE: &str = "reviews_user_target_key";
const CNT_SAVED_ONCE: &str = "saved_items_user_target_key";
const CNT_REGISTRATION_ONCE: &str = "event_registrations_event_user_key";
const CNT_PACKAGE_DISCOUNT: &str = "packages_discount_chk";
const CNT_EVENT_DATE_ORDER: &str = "events_date_order_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_BLOG_SLUG | CNT_PACKAGE_SLUG | CNT_EVENT_SLUG | CNT_DESTINATION_SLUG
                    | CNT_BUSINESS_SLUG => DomainError::DuplicateSlug,
                    CNT_USER_USERNAME => DomainError::Conflict("username already exists".into()),
                    CNT_USER_EMAIL => DomainError::Conflict("email already exists".into()),
                    CNT_REVIEW_ONCE => {
                        DomainError::Conflict("you have already reviewed this record".into())
                    }
                    CNT_SAVED_ONCE => DomainError::Conflict("record is already saved".into()),
                    CNT_REGISTRATION_ONCE => {
                        DomainError::Conflict("already registered for this event".into())
                    }
                    CNT_PACKAGE_DISCOUNT => DomainError::invalid(
                        "discounted_price_cents",
                        "discounted price cannot exceed the price",
                    ),
                    CNT_EVENT_DATE_ORDER => {
                        DomainError::invalid("end_date", "end date must be after start date")
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
