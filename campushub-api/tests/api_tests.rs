/// Router tests that need no database
///
/// Every request here is answered before a query would run: auth rejections,
/// body validation, static files and response headers.

#[allow(dead_code)]
mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use common::{body_json, form_request, json_request, multipart_request, token_for, TestContext};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let ctx = TestContext::offline();

    let response = ctx.send(json_request(Method::GET, "/api/projects", None, None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authentication required: No token provided.");
}

#[tokio::test]
async fn test_invalid_token_is_forbidden() {
    let ctx = TestContext::offline();

    let response = ctx
        .send(json_request(Method::GET, "/api/all-projects", Some("not-a-jwt"), None))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Forbidden: Invalid or expired token.");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_forbidden() {
    let ctx = TestContext::offline();
    let claims = campushub_shared::auth::jwt::Claims::new(
        Uuid::new_v4(),
        "a@b.c",
        chrono::Duration::hours(1),
    );
    let token = campushub_shared::auth::jwt::create_token(
        &claims,
        "another-secret-key-at-least-32-bytes-long",
    )
    .unwrap();

    let response = ctx
        .send(json_request(Method::GET, "/api/projects", Some(&token), None))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_signup_missing_field_is_bad_request() {
    let ctx = TestContext::offline();

    let response = ctx
        .send(json_request(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "name": "Ana", "email": "ana@x.com", "password": "pw123456" })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing required field: rollNumber");
}

#[tokio::test]
async fn test_signup_multipart_malformed_skills_is_bad_request() {
    let ctx = TestContext::offline();

    let response = ctx
        .send(multipart_request(
            "/signup",
            &[
                ("name", None, b"Ana"),
                ("email", None, b"ana@x.com"),
                ("password", None, b"pw123456"),
                ("rollNumber", None, b"R1"),
                ("skills", None, b"[\"Go\", "),
                ("documents", Some("cv.pdf"), b"%PDF"),
            ],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON in skills"));

    // Rejected before anything was staged
    assert_eq!(std::fs::read_dir(ctx.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_signup_unexpected_file_field_is_bad_request() {
    let ctx = TestContext::offline();

    let response = ctx
        .send(multipart_request(
            "/signup",
            &[
                ("name", None, b"Ana"),
                ("avatar", Some("me.png"), b"png"),
            ],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Unexpected file field: avatar");
}

#[tokio::test]
async fn test_signup_rejects_second_profile_picture() {
    let ctx = TestContext::offline();

    let response = ctx
        .send(multipart_request(
            "/signup",
            &[
                ("profilePicture", Some("a.png"), b"a"),
                ("profilePicture", Some("b.png"), b"b"),
            ],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_malformed_email_is_rejected() {
    let ctx = TestContext::offline();

    let response = ctx
        .send(json_request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": "not-an-email", "password": "x" })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["details"][0]["field"], "email");
}

#[tokio::test]
async fn test_create_entry_requires_name() {
    let ctx = TestContext::offline();
    let token = token_for(Uuid::new_v4());

    let response = ctx
        .send(json_request(
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({ "project_description": "no name", "type": "event" })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Event name is required.");
}

#[tokio::test]
async fn test_create_entry_rejects_unknown_type() {
    let ctx = TestContext::offline();
    let token = token_for(Uuid::new_v4());

    let response = ctx
        .send(json_request(
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({ "project_name": "Meetup", "type": "meetup" })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_notifications_of_other_user_are_forbidden() {
    let ctx = TestContext::offline();
    let token = token_for(Uuid::new_v4());
    let other = Uuid::new_v4();

    for (method, uri) in [
        (Method::GET, format!("/api/notifications/{}", other)),
        (Method::PUT, format!("/api/notifications/{}/read", other)),
        (Method::GET, format!("/api/notifications/{}/unread", other)),
    ] {
        let response = ctx.send(json_request(method, &uri, Some(&token), None)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
    }
}

#[tokio::test]
async fn test_uploads_are_served_with_security_headers() {
    let ctx = TestContext::offline();
    std::fs::write(ctx.upload_dir.path().join("1-2.txt"), b"hello").unwrap();

    let response = ctx
        .send(Request::builder().uri("/uploads/1-2.txt").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"hello");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::offline();

    let response = ctx.send(json_request(Method::GET, "/nope", None, None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_db_probe_fails_without_database() {
    let ctx = TestContext::offline();

    let response = ctx.send(json_request(Method::GET, "/test-db", None, None)).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"], "service_unavailable");
}

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let ctx = TestContext::offline();

    let response = ctx.send(json_request(Method::GET, "/health", None, None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_signup_urlencoded_missing_field_is_bad_request() {
    let ctx = TestContext::offline();

    let response = ctx
        .send(form_request(
            "/signup",
            &[("name", "Ana"), ("email", "ana%40x.com"), ("password", "pw123456")],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing required field: rollNumber");
}

#[tokio::test]
async fn test_signup_urlencoded_malformed_projects_is_bad_request() {
    let ctx = TestContext::offline();

    let response = ctx
        .send(form_request(
            "/signup",
            &[
                ("name", "Ana"),
                ("email", "ana%40x.com"),
                ("password", "pw123456"),
                ("rollNumber", "R1"),
                ("projects", "%5B%7B"),
            ],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON in projects"));
}
