//! Credential lifecycle: signup, signin, token gating and the OTP-based
//! password reset flow.

mod common;

use common::{request, signup_and_token, spawn_app};
use http::StatusCode;
use serde_json::{Value, json};
use std::time::{SystemTime, UNIX_EPOCH};

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis() as i64
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let test_app = spawn_app().await;

    let (status, _) = request(&test_app.app, "GET", "/api/customers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &test_app.app,
        "GET",
        "/api/customers",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Health stays public
    let (status, _) = request(&test_app.app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn signup_issues_a_working_token() {
    let test_app = spawn_app().await;
    let token = signup_and_token(&test_app.app).await;

    let (status, body) = request(&test_app.app, "GET", "/api/customers", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn signup_rejects_duplicate_username_and_email() {
    let test_app = spawn_app().await;
    signup_and_token(&test_app.app).await;

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": "owner",
            "email": "different@example.com",
            "password": "s3cret-pass",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": "different",
            "email": "owner@example.com",
            "password": "s3cret-pass",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn signin_with_wrong_password_returns_401_and_no_token() {
    let test_app = spawn_app().await;
    signup_and_token(&test_app.app).await;

    let (status, body) = request(
        &test_app.app,
        "POST",
        "/api/users/signin",
        None,
        Some(json!({"email": "owner@example.com", "password": "wrong-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["token"].is_null());
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn signin_with_unknown_email_uses_the_same_message() {
    let test_app = spawn_app().await;
    signup_and_token(&test_app.app).await;

    let (wrong_pass_status, wrong_pass_body) = request(
        &test_app.app,
        "POST",
        "/api/users/signin",
        None,
        Some(json!({"email": "owner@example.com", "password": "wrong-pass"})),
    )
    .await;
    let (unknown_status, unknown_body) = request(
        &test_app.app,
        "POST",
        "/api/users/signin",
        None,
        Some(json!({"email": "nobody@example.com", "password": "wrong-pass"})),
    )
    .await;

    assert_eq!(wrong_pass_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pass_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn signin_with_correct_password_returns_token() {
    let test_app = spawn_app().await;
    signup_and_token(&test_app.app).await;

    let (status, body) = request(
        &test_app.app,
        "POST",
        "/api/users/signin",
        None,
        Some(json!({"email": "owner@example.com", "password": "s3cret-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["username"], "owner");
    // Credential material never leaves the API
    assert!(body["user"].get("hashPass").is_none());
    assert!(body["user"].get("password").is_none());
}

/// Read the reset code that forgot-password stored on the user record
async fn stored_reset_code(test_app: &common::TestApp, email: &str) -> Option<String> {
    let mut result = test_app
        .state
        .get_db()
        .query("SELECT resetPasswordToken FROM user WHERE email = $email LIMIT 1")
        .bind(("email", email.to_string()))
        .await
        .expect("query failed");
    let rows: Vec<Value> = result.take(0).expect("take failed");
    rows.first()
        .and_then(|row| row["resetPasswordToken"].as_str())
        .map(str::to_string)
}

#[tokio::test]
async fn full_password_reset_flow() {
    let test_app = spawn_app().await;
    signup_and_token(&test_app.app).await;

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/forgot-password",
        None,
        Some(json!({"email": "owner@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let code = stored_reset_code(&test_app, "owner@example.com")
        .await
        .expect("reset code was not stored");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/verify-otp",
        None,
        Some(json!({"email": "owner@example.com", "otp": code})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/reset-password",
        None,
        Some(json!({"email": "owner@example.com", "password": "brand-new-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password is gone, new one works
    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/signin",
        None,
        Some(json!({"email": "owner@example.com", "password": "s3cret-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/signin",
        None,
        Some(json!({"email": "owner@example.com", "password": "brand-new-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn verify_otp_rejects_wrong_code() {
    let test_app = spawn_app().await;
    signup_and_token(&test_app.app).await;

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/forgot-password",
        None,
        Some(json!({"email": "owner@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let code = stored_reset_code(&test_app, "owner@example.com")
        .await
        .expect("reset code was not stored");
    // Guaranteed mismatch regardless of the generated digits
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/verify-otp",
        None,
        Some(json!({"email": "owner@example.com", "otp": wrong})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn verify_otp_rejects_expired_code_even_when_it_matches() {
    let test_app = spawn_app().await;
    signup_and_token(&test_app.app).await;

    // Plant a matching code whose expiry is already in the past
    let expired = now_millis() - 20 * 60 * 1000;
    test_app
        .state
        .get_db()
        .query("UPDATE user SET resetPasswordToken = $token, resetPasswordExpires = $expires WHERE email = $email")
        .bind(("token", "123456".to_string()))
        .bind(("expires", expired))
        .bind(("email", "owner@example.com".to_string()))
        .await
        .expect("failed to plant expired code");

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/verify-otp",
        None,
        Some(json!({"email": "owner@example.com", "otp": "123456"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reset_password_requires_a_pending_code() {
    let test_app = spawn_app().await;
    signup_and_token(&test_app.app).await;

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/users/reset-password",
        None,
        Some(json!({"email": "owner@example.com", "password": "brand-new-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forgot_password_answers_generically_for_unknown_email() {
    let test_app = spawn_app().await;

    let (status, body) = request(
        &test_app.app,
        "POST",
        "/api/users/forgot-password",
        None,
        Some(json!({"email": "nobody@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
}
