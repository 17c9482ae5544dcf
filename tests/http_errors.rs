use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod support;

fn post_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "content": "Injera for breakfast, lunch and dinner.",
        "tags": ["food"]
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let app = support::TestWorld::new().router();
    let resp = app
        .oneshot(support::empty_request(Method::GET, "/health", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(support::read_json(resp).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let app = support::TestWorld::new().router();
    let resp = app
        .oneshot(support::empty_request(
            Method::GET,
            "/api/v1/blog/posts/by-slug/nowhere",
            None,
        ))
        .await
        .unwrap();

    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn writes_without_a_token_are_unauthorized() {
    let app = support::TestWorld::new().router();
    let resp = app
        .oneshot(support::json_request(
            Method::POST,
            "/api/v1/blog/posts",
            None,
            post_body("Addis Street Food"),
        ))
        .await
        .unwrap();

    support::assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn unknown_tokens_are_unauthorized() {
    let app = support::TestWorld::new().router();
    let resp = app
        .oneshot(support::json_request(
            Method::POST,
            "/api/v1/blog/posts",
            Some("forged"),
            post_body("Addis Street Food"),
        ))
        .await
        .unwrap();

    support::assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn blank_title_names_the_field() {
    let app = support::TestWorld::new().router();
    let resp = app
        .oneshot(support::json_request(
            Method::POST,
            "/api/v1/blog/posts",
            Some(support::TRAVELER_TOKEN),
            post_body("   "),
        ))
        .await
        .unwrap();

    let body =
        support::assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    assert_eq!(body["field"], "title");
}

#[tokio::test]
async fn created_post_is_reachable_by_slug() {
    let app = support::TestWorld::new().router();
    let created = app
        .clone()
        .oneshot(support::json_request(
            Method::POST,
            "/api/v1/blog/posts",
            Some(support::TRAVELER_TOKEN),
            json!({
                "title": "My First Trip!",
                "content": "Gondar in the rain.",
                "status": "published"
            }),
        ))
        .await
        .unwrap();
    assert!(created.status().is_success());
    let created = support::read_json(created).await;
    assert_eq!(created["slug"], "my-first-trip");

    let resp = app
        .oneshot(support::empty_request(
            Method::GET,
            "/api/v1/blog/posts/by-slug/my-first-trip",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = support::read_json(resp).await;
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn full_events_answer_with_conflict() {
    let world = support::TestWorld::new();
    let event = support::published_event(&world, "Sold Out Supper", Some(1)).await;
    let app = world.router();
    let uri = format!("/api/v1/events/{}/register", event.id);

    let first = app
        .clone()
        .oneshot(support::empty_request(
            Method::POST,
            &uri,
            Some(support::OTHER_TRAVELER_TOKEN),
        ))
        .await
        .unwrap();
    assert!(first.status().is_success());

    let second = app
        .oneshot(support::empty_request(Method::POST, &uri, Some(support::STAFF_TOKEN)))
        .await
        .unwrap();
    let body = support::assert_error_response(second, StatusCode::CONFLICT, "Conflict").await;
    assert_eq!(body["message"], "event is full");
}

#[tokio::test]
async fn unknown_review_sort_is_rejected() {
    let world = support::TestWorld::new();
    let event = support::published_event(&world, "Jinka Market", None).await;
    let resp = world
        .router()
        .oneshot(support::empty_request(
            Method::GET,
            &format!("/api/v1/events/{}/reviews?sort=loudest", event.id),
            None,
        ))
        .await
        .unwrap();

    support::assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn business_form_metadata_is_public() {
    let app = support::TestWorld::new().router();
    let resp = app
        .oneshot(support::empty_request(Method::GET, "/api/v1/businesses/new", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = support::read_json(resp).await;
    assert!(body.is_object() || body.is_array());
}
