// src/presentation/http/routes.rs
use crate::domain::resource::ResourceKind;
use crate::presentation::http::controllers::{
    auth, blog, bookings, businesses, departures, destinations, events, packages, reviews, saved,
    users,
};
use crate::presentation::http::middleware::rate_limit::rate_limit_layer;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Transport settings applied around the API routes.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    pub allowed_origins: Vec<String>,
    /// `(per_second, burst)`; `None` disables rate limiting.
    pub rate_limit: Option<(u64, u32)>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub fn build_router(state: HttpState, config: RouterConfig) -> Router {
    let mut router = api_routes().route("/health", get(health));

    if let Some((per_second, burst)) = config.rate_limit {
        match rate_limit_layer(per_second, burst) {
            Some(layer) => router = router.layer(layer),
            None => tracing::warn!(per_second, burst, "rate limiting disabled: invalid quota"),
        }
    }

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .layer(Extension(state))
}

fn api_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/auth/register",
            get(auth::register_form).post(auth::register),
        )
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::profile))
        .route("/api/v1/users", get(users::list_users))
        .route("/api/v1/users/{id}/toggle-active", post(users::toggle_active))
        .route("/api/v1/users/{id}/toggle-staff", post(users::toggle_staff))
        .route(
            "/api/v1/users/{id}/change-password",
            post(users::change_password),
        )
        .merge(blog_routes())
        .merge(package_routes())
        .merge(event_routes())
        .merge(destination_routes())
        .merge(business_routes())
        .merge(booking_routes())
        .route(
            "/api/v1/reviews/{id}",
            axum::routing::delete(reviews::delete_review),
        )
        .route("/api/v1/reviews/{id}/helpful", post(reviews::mark_helpful))
        .route("/api/v1/reviews/{id}/report", post(reviews::report_review))
        .route("/api/v1/saved/{kind}", get(saved::list_saved))
}

fn blog_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/blog/posts",
            get(blog::list_posts).post(blog::create_post),
        )
        .route(
            "/api/v1/blog/posts/by-slug/{slug}",
            get(blog::get_post_by_slug),
        )
        .route(
            "/api/v1/blog/posts/{id}",
            get(blog::get_post)
                .put(blog::update_post)
                .patch(blog::update_post)
                .delete(blog::delete_post),
        )
        .route("/api/v1/blog/posts/{id}/view", post(blog::record_view))
        .route(
            "/api/v1/blog/posts/{id}/toggle-featured",
            post(blog::toggle_featured),
        )
        .route(
            "/api/v1/blog/posts/{id}/comments",
            get(blog::list_comments).post(blog::add_comment),
        )
        .route(
            "/api/v1/blog/posts/{id}/save",
            saved::routes_for(ResourceKind::BlogPost),
        )
}

fn package_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/packages",
            get(packages::list_packages).post(packages::create_package),
        )
        .route("/api/v1/packages/featured", get(packages::featured_packages))
        .route("/api/v1/packages/categories", get(packages::categories))
        .route("/api/v1/packages/regions", get(packages::regions))
        .route(
            "/api/v1/packages/by-slug/{slug}",
            get(packages::get_package_by_slug),
        )
        .route(
            "/api/v1/packages/{id}",
            get(packages::get_package)
                .put(packages::update_package)
                .patch(packages::update_package)
                .delete(packages::delete_package),
        )
        .route(
            "/api/v1/packages/{id}/toggle-featured",
            post(packages::toggle_featured),
        )
        .route(
            "/api/v1/packages/{id}/toggle-status",
            post(packages::toggle_status),
        )
        .route(
            "/api/v1/packages/{id}/reviews",
            reviews::routes_for(ResourceKind::Package),
        )
        .route(
            "/api/v1/packages/{id}/save",
            saved::routes_for(ResourceKind::Package),
        )
        .route(
            "/api/v1/packages/{id}/departures",
            get(departures::list_for_package).post(departures::create_departure),
        )
        .route("/api/v1/departures/mine", get(departures::my_departures))
        .route(
            "/api/v1/departures/{id}",
            get(departures::get_departure)
                .put(departures::update_departure)
                .patch(departures::update_departure)
                .delete(departures::delete_departure),
        )
}

fn event_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/events",
            get(events::list_events).post(events::create_event),
        )
        .route("/api/v1/events/upcoming", get(events::upcoming_events))
        .route("/api/v1/events/featured", get(events::featured_events))
        .route("/api/v1/events/categories", get(events::categories))
        .route("/api/v1/events/mine", get(events::my_events))
        .route("/api/v1/events/calendar", get(events::calendar))
        .route(
            "/api/v1/events/by-slug/{slug}",
            get(events::get_event_by_slug),
        )
        .route(
            "/api/v1/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/api/v1/events/{id}/toggle-status",
            post(events::toggle_status),
        )
        .route(
            "/api/v1/events/{id}/toggle-featured",
            post(events::toggle_featured),
        )
        .route("/api/v1/events/{id}/register", post(events::register))
        .route(
            "/api/v1/events/{id}/cancel-registration",
            post(events::cancel_registration),
        )
        .route(
            "/api/v1/events/{id}/registrations",
            get(events::list_registrations),
        )
        .route(
            "/api/v1/events/{id}/reviews",
            reviews::routes_for(ResourceKind::Event),
        )
        .route(
            "/api/v1/events/{id}/save",
            saved::routes_for(ResourceKind::Event),
        )
}

fn destination_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/destinations",
            get(destinations::list_destinations).post(destinations::create_destination),
        )
        .route(
            "/api/v1/destinations/by-slug/{slug}",
            get(destinations::get_destination_by_slug),
        )
        .route(
            "/api/v1/destinations/{id}",
            get(destinations::get_destination)
                .put(destinations::update_destination)
                .patch(destinations::update_destination)
                .delete(destinations::delete_destination),
        )
        .route(
            "/api/v1/destinations/{id}/toggle-featured",
            post(destinations::toggle_featured),
        )
        .route(
            "/api/v1/destinations/{id}/reviews",
            reviews::routes_for(ResourceKind::Destination),
        )
        .route(
            "/api/v1/destinations/{id}/save",
            saved::routes_for(ResourceKind::Destination),
        )
}

fn business_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/businesses",
            get(businesses::list_businesses).post(businesses::create_business),
        )
        .route("/api/v1/businesses/new", get(businesses::new_form))
        .route(
            "/api/v1/businesses/featured",
            get(businesses::featured_businesses),
        )
        .route("/api/v1/businesses/mine", get(businesses::my_businesses))
        .route(
            "/api/v1/businesses/by-slug/{slug}",
            get(businesses::get_business_by_slug),
        )
        .route(
            "/api/v1/businesses/{id}",
            get(businesses::get_business)
                .put(businesses::update_business)
                .patch(businesses::update_business)
                .delete(businesses::delete_business),
        )
        .route(
            "/api/v1/businesses/{id}/toggle-featured",
            post(businesses::toggle_featured),
        )
        .route("/api/v1/businesses/{id}/verify", post(businesses::verify))
        .route(
            "/api/v1/businesses/{id}/reviews",
            reviews::routes_for(ResourceKind::Business),
        )
        .route(
            "/api/v1/businesses/{id}/save",
            saved::routes_for(ResourceKind::Business),
        )
}

fn booking_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/api/v1/bookings/upcoming", get(bookings::upcoming_bookings))
        .route(
            "/api/v1/bookings/{id}/confirm",
            post(bookings::confirm_booking),
        )
        .route("/api/v1/bookings/{id}/cancel", post(bookings::cancel_booking))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}
