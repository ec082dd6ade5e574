/// End-to-end API flows against PostgreSQL
///
/// Run with `cargo test -p campushub-api -- --ignored` and `DATABASE_URL` set.

#[allow(dead_code)]
mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, json_request, multipart_request, TestContext};
use serde_json::{json, Value};
use uuid::Uuid;

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@campus.test", prefix, Uuid::new_v4())
}

/// Signs up through the JSON body and logs in, returning `(user_id, token)`
async fn signup_and_login(ctx: &TestContext, name: &str, email: &str) -> (Uuid, String) {
    let response = ctx
        .send(json_request(
            Method::POST,
            "/signup",
            None,
            Some(json!({
                "name": name,
                "email": email,
                "password": "correct horse",
                "rollNumber": format!("R-{}", name),
            })),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .send(json_request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": email, "password": "correct horse" })),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let user_id: Uuid = serde_json::from_value(body["userId"].clone()).unwrap();
    let token = body["token"].as_str().unwrap().to_string();
    (user_id, token)
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_multipart_signup_persists_profile() {
    let ctx = TestContext::new().await.unwrap();
    let email = unique_email("ana");

    let response = ctx
        .send(multipart_request(
            "/signup",
            &[
                ("name", None, b"Ana"),
                ("email", None, email.as_bytes()),
                ("password", None, b"pw123456"),
                ("rollNumber", None, b"R1"),
                ("yearOfStudy", None, b"2"),
                ("skills", None, br#"["Go","SQL"]"#),
                (
                    "projects",
                    None,
                    br#"[{"project_name":"Hackathon","project_description":"48h","links":["a.io"," b.io "],"type":"event"}]"#,
                ),
                ("documents", Some("cv.pdf"), b"%PDF-1.4"),
            ],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "✅ User Registered Successfully");

    let user_id: Uuid = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&ctx.db)
        .await
        .unwrap();

    let response = ctx
        .send(json_request(Method::GET, &format!("/profile/{}", user_id), None, None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let profile = body_json(response).await;
    let user = &profile["user"];
    assert_eq!(user["name"], "Ana");
    assert_eq!(user["skills"], json!(["Go", "SQL"]));
    assert_eq!(user["projects"][0]["links"], "a.io,b.io");
    assert_eq!(user["projects"][0]["type"], "event");
    assert_eq!(user["documents"][0]["name"], "cv.pdf");

    // The staged document is reachable under its public path
    let file = user["documents"][0]["file"].as_str().unwrap().to_string();
    let response = ctx.send(json_request(Method::GET, &file, None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_signup_conflicts() {
    let ctx = TestContext::new().await.unwrap();
    let email = unique_email("dup");
    signup_and_login(&ctx, "Dup", &email).await;

    let response = ctx
        .send(json_request(
            Method::POST,
            "/signup",
            None,
            Some(json!({
                "name": "Dup Again",
                "email": email,
                "password": "pw",
                "rollNumber": "R2",
                "skills": ["Rust"],
            })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_login_with_wrong_password_is_unauthorized() {
    let ctx = TestContext::new().await.unwrap();
    let email = unique_email("login");
    signup_and_login(&ctx, "Lee", &email).await;

    let response = ctx
        .send(json_request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": email, "password": "wrong" })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_entry_registration_and_notification_flow() {
    let ctx = TestContext::new().await.unwrap();
    let (host_id, host_token) = signup_and_login(&ctx, "Host", &unique_email("host")).await;
    let (guest_id, guest_token) = signup_and_login(&ctx, "Guest", &unique_email("guest")).await;

    // Host publishes an event
    let response = ctx
        .send(json_request(
            Method::POST,
            "/api/projects",
            Some(&host_token),
            Some(json!({
                "project_name": "Robotics Night",
                "project_description": "Bring a soldering iron",
                "links": "x.io",
                "type": "event",
            })),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry = body_json(response).await;
    let entry_id = entry["id"].as_str().unwrap().to_string();
    assert_eq!(entry["user_id"], host_id.to_string());

    let response = ctx
        .send(json_request(Method::GET, "/api/projects", Some(&host_token), None))
        .await;
    let own: Value = body_json(response).await;
    assert!(own.as_array().unwrap().iter().any(|e| e["id"] == entry["id"]));

    // Host cannot join their own event
    let register_uri = format!("/api/projects/{}/register", entry_id);
    let response = ctx
        .send(json_request(Method::POST, &register_uri, Some(&host_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Guest joins once
    let response = ctx
        .send(json_request(Method::POST, &register_uri, Some(&guest_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["registrationId"].is_string());

    let response = ctx
        .send(json_request(Method::POST, &register_uri, Some(&guest_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Only the host sees registrants
    let registrations_uri = format!("/api/projects/{}/registrations", entry_id);
    let response = ctx
        .send(json_request(Method::GET, &registrations_uri, Some(&guest_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .send(json_request(Method::GET, &registrations_uri, Some(&host_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let registrants = body_json(response).await;
    assert_eq!(registrants.as_array().unwrap().len(), 1);
    assert_eq!(registrants[0]["user_id"], guest_id.to_string());

    // Host was notified
    let response = ctx
        .send(json_request(
            Method::GET,
            &format!("/api/notifications/{}/unread", host_id),
            Some(&host_token),
            None,
        ))
        .await;
    assert_eq!(body_json(response).await["count"], 1);

    let response = ctx
        .send(json_request(
            Method::GET,
            &format!("/api/notifications/{}", host_id),
            Some(&host_token),
            None,
        ))
        .await;
    let notifications = body_json(response).await;
    assert_eq!(notifications[0]["project_title"], "Robotics Night");
    assert_eq!(notifications[0]["joinee_username"], "Guest");
    assert_eq!(notifications[0]["is_read"], false);

    let response = ctx
        .send(json_request(
            Method::PUT,
            &format!("/api/notifications/{}/read", host_id),
            Some(&host_token),
            None,
        ))
        .await;
    assert_eq!(body_json(response).await["updated"], 1);

    let response = ctx
        .send(json_request(
            Method::GET,
            &format!("/api/notifications/{}/unread", host_id),
            Some(&host_token),
            None,
        ))
        .await;
    assert_eq!(body_json(response).await["count"], 0);

    // Only the host may delete
    let entry_uri = format!("/api/projects/{}", entry_id);
    let response = ctx
        .send(json_request(Method::DELETE, &entry_uri, Some(&guest_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .send(json_request(Method::DELETE, &entry_uri, Some(&host_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .send(json_request(Method::DELETE, &entry_uri, Some(&host_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_manual_notification_requires_existing_rows() {
    let ctx = TestContext::new().await.unwrap();
    let (user_id, token) = signup_and_login(&ctx, "Nia", &unique_email("nia")).await;

    let response = ctx
        .send(json_request(
            Method::POST,
            "/api/notifications",
            Some(&token),
            Some(json!({ "projectId": Uuid::new_v4(), "joineeId": user_id })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Project or user not found");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_health_reports_database() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(json_request(Method::GET, "/health", None, None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_profile_of_unknown_user_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(json_request(Method::GET, &format!("/profile/{}", Uuid::new_v4()), None, None))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User not found");
}
