use super::helpers::{
    TEST_PASSWORD, expect_status, json_request, read_json, send, spawn_app, unique_email,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};

fn me_request(authorization: &str) -> Request<Body> {
    Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .expect("failed to build me request")
}

#[tokio::test]
async fn register_login_and_me() {
    let app = spawn_app().await;
    let email = unique_email("Cook").to_uppercase();

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/auth/register",
            json!({ "email": format!("  {}  ", email), "password": TEST_PASSWORD }),
        ),
    )
    .await;
    let registered: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(registered["user"]["email"], email.to_lowercase());
    assert!(registered["user"].get("passwordHash").is_none());

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": email, "password": TEST_PASSWORD }),
        ),
    )
    .await;
    let logged_in: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let token = logged_in["token"].as_str().expect("missing token");

    let res = send(&app.app, me_request(&format!("Bearer {}", token))).await;
    let profile: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(profile["id"], registered["user"]["id"]);
    assert_eq!(profile["likedRecipes"], json!([]));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = spawn_app().await;
    let email = unique_email("dup");
    let body = json!({ "email": email, "password": TEST_PASSWORD });

    expect_status(
        send(&app.app, json_request("POST", "/auth/register", body.clone())).await,
        StatusCode::OK,
    )
    .await;
    let res = expect_status(
        send(&app.app, json_request("POST", "/auth/register", body)).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    let err: Value = read_json(res).await;
    assert_eq!(err["message"], "Email already registered");
}

#[tokio::test]
async fn register_validates_input() {
    let app = spawn_app().await;

    let short = json!({ "email": unique_email("short"), "password": "abc" });
    expect_status(
        send(&app.app, json_request("POST", "/auth/register", short)).await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    let bad_email = json!({ "email": "not-an-email", "password": TEST_PASSWORD });
    expect_status(
        send(&app.app, json_request("POST", "/auth/register", bad_email)).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = spawn_app().await;
    let email = unique_email("secret");
    expect_status(
        send(
            &app.app,
            json_request(
                "POST",
                "/auth/register",
                json!({ "email": email, "password": TEST_PASSWORD }),
            ),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    for body in [
        json!({ "email": email, "password": "wrong-password" }),
        json!({ "email": unique_email("nobody"), "password": TEST_PASSWORD }),
    ] {
        let res = expect_status(
            send(&app.app, json_request("POST", "/auth/login", body)).await,
            StatusCode::UNAUTHORIZED,
        )
        .await;
        let err: Value = read_json(res).await;
        assert_eq!(err["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn me_rejects_bad_authorization_headers() {
    let app = spawn_app().await;

    for (header_value, message) in [
        ("Basic dXNlcjpwYXNz", "Invalid token"),
        ("Bearer ", "No token"),
        ("Bearer definitely.not.valid", "Invalid token"),
    ] {
        let res = expect_status(
            send(&app.app, me_request(header_value)).await,
            StatusCode::UNAUTHORIZED,
        )
        .await;
        let err: Value = read_json(res).await;
        assert_eq!(err["message"], message, "header {:?}", header_value);
    }
}

#[tokio::test]
async fn unparseable_bodies_get_a_message() {
    let app = spawn_app().await;

    let res = expect_status(
        send(&app.app, json_request("POST", "/auth/register", json!({}))).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    let err: Value = read_json(res).await;
    assert!(err["message"].as_str().is_some_and(|m| !m.is_empty()));

    let res = expect_status(
        send(
            &app.app,
            json_request("POST", "/auth/register", json!({ "email": "a@example.com" })),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    let err: Value = read_json(res).await;
    assert!(err["message"].is_string());

    let not_json = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("email=a@example.com"))
        .expect("failed to build login request");
    let res = expect_status(send(&app.app, not_json).await, StatusCode::BAD_REQUEST).await;
    let err: Value = read_json(res).await;
    assert!(err["message"].is_string());
}
