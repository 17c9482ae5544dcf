// tests/support/helpers.rs
use super::mocks::{
    Catalog, FixedClock, InMemoryBookings, InMemoryBusinesses, InMemoryDepartures,
    InMemoryDestinations, InMemoryEvents, InMemoryPackages, InMemoryPosts, InMemoryRegistrations,
    InMemoryReviews, InMemorySaved, InMemoryUsers, PlainPasswordHasher, StubTokenManager,
};
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use std::sync::Arc;
use trailhead_core::application::services::{ApplicationServices, Collaborators, Repositories};
use trailhead_core::infrastructure::util::DefaultSlugGenerator;
use trailhead_core::presentation::http::{
    routes::{RouterConfig, build_router},
    state::HttpState,
};

/// Application services wired to in-memory stores, with handles on the
/// stores so tests can inspect what was written.
pub struct TestWorld {
    pub catalog: Arc<Catalog>,
    pub posts: Arc<InMemoryPosts>,
    pub events: Arc<InMemoryEvents>,
    pub packages: Arc<InMemoryPackages>,
    pub departures: Arc<InMemoryDepartures>,
    pub destinations: Arc<InMemoryDestinations>,
    pub businesses: Arc<InMemoryBusinesses>,
    pub reviews: Arc<InMemoryReviews>,
    pub services: Arc<ApplicationServices>,
}

impl TestWorld {
    pub fn new() -> Self {
        let catalog = Arc::new(Catalog::default());
        let posts = Arc::new(InMemoryPosts::new(Arc::clone(&catalog)));
        let events = Arc::new(InMemoryEvents::new(Arc::clone(&catalog)));
        let packages = Arc::new(InMemoryPackages::new(Arc::clone(&catalog)));
        let departures = Arc::new(InMemoryDepartures::new(Arc::clone(&catalog)));
        let destinations = Arc::new(InMemoryDestinations::new(Arc::clone(&catalog)));
        let businesses = Arc::new(InMemoryBusinesses::new(Arc::clone(&catalog)));
        let reviews = Arc::new(InMemoryReviews::default());

        let repos = Repositories {
            users: Arc::new(InMemoryUsers::default()),
            posts: posts.clone(),
            packages: packages.clone(),
            departures: departures.clone(),
            events: events.clone(),
            registrations: Arc::new(InMemoryRegistrations::new(events.table())),
            destinations: destinations.clone(),
            businesses: businesses.clone(),
            bookings: Arc::new(InMemoryBookings::new(events.table(), departures.table())),
            reviews: reviews.clone(),
            saved: Arc::new(InMemorySaved::default()),
            slugs: catalog.clone(),
            records: catalog.clone(),
        };
        let deps = Collaborators {
            password_hasher: Arc::new(PlainPasswordHasher),
            token_manager: Arc::new(StubTokenManager),
            clock: Arc::new(FixedClock),
            slugger: Arc::new(DefaultSlugGenerator),
            slug_max_attempts: 5,
        };

        Self {
            catalog,
            posts,
            events,
            packages,
            departures,
            destinations,
            businesses,
            reviews,
            services: Arc::new(ApplicationServices::new(repos, deps)),
        }
    }

    /// Router without rate limiting, the way the binary builds it otherwise.
    pub fn router(&self) -> axum::Router {
        let state = HttpState {
            services: Arc::clone(&self.services),
        };
        build_router(
            state,
            RouterConfig {
                allowed_origins: vec!["http://localhost:3000".into()],
                rate_limit: None,
            },
        )
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Asserts the `{error, message, field?}` error body and returns it.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content-type: {content_type}"
    );
    let json = read_json(resp).await;
    assert_eq!(json["error"], expected_error);
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected a non-empty message"
    );
    json
}

/// HTTP status an application error surfaces as.
pub fn status_of(err: trailhead_core::application::error::ApplicationError) -> StatusCode {
    trailhead_core::presentation::http::error::HttpError::from_error(err).status()
}
