//! Order CRUD, customer projection and the status lifecycle.

mod common;

use common::{request, signup_and_token, spawn_app};
use http::StatusCode;
use serde_json::json;

async fn create_customer(test_app: &common::TestApp, token: &str) -> String {
    let (status, customer) = request(
        &test_app.app,
        "POST",
        "/api/customers",
        Some(token),
        Some(json!({
            "name": "Demir Insaat",
            "phone": "+90 555 222 3344",
            "address": "Sanayi Mah. 14. Sok. No:7",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    customer["id"].as_str().expect("customer id").to_string()
}

#[tokio::test]
async fn create_order_applies_defaults_and_resolves_customer() {
    let test_app = spawn_app().await;
    let token = signup_and_token(&test_app.app).await;
    let customer_id = create_customer(&test_app, &token).await;

    let (status, order) = request(
        &test_app.app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "customer": customer_id,
            "width": 120.0,
            "height": 80.0,
            "cost": 1500.0,
            "price": 2400.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "received");
    assert_eq!(order["ralCode"], "Standart");
    assert_eq!(order["glassColor"], "clear");

    // Customer reference resolved to the display projection
    assert_eq!(order["customer"]["name"], "Demir Insaat");
    assert_eq!(order["customer"]["phone"], "+90 555 222 3344");
    assert_eq!(order["customer"]["address"], "Sanayi Mah. 14. Sok. No:7");
}

#[tokio::test]
async fn order_requires_an_existing_customer() {
    let test_app = spawn_app().await;
    let token = signup_and_token(&test_app.app).await;

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "customer": "customer:doesnotexist",
            "width": 100.0,
            "height": 100.0,
            "cost": 100.0,
            "price": 200.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_accepts_every_stage_and_rejects_unknown_values() {
    let test_app = spawn_app().await;
    let token = signup_and_token(&test_app.app).await;
    let customer_id = create_customer(&test_app, &token).await;

    let (_, order) = request(
        &test_app.app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "customer": customer_id,
            "width": 60.0,
            "height": 40.0,
            "cost": 300.0,
            "price": 550.0,
        })),
    )
    .await;
    let id = order["id"].as_str().expect("order id");

    // Direct assignment is unconstrained across all seven stages,
    // including jumping backwards
    for stage in [
        "production",
        "assembly",
        "packaging",
        "ready",
        "installed",
        "received",
        "cancelled",
    ] {
        let (status, order) = request(
            &test_app.app,
            "PATCH",
            &format!("/api/orders/{id}/status"),
            Some(&token),
            Some(json!({"status": stage})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "stage {stage} rejected");
        assert_eq!(order["status"], stage);
    }

    // Anything outside the enum dies at deserialization
    let (status, _) = request(
        &test_app.app,
        "PATCH",
        &format!("/api/orders/{id}/status"),
        Some(&token),
        Some(json!({"status": "shipped"})),
    )
    .await;
    assert!(status.is_client_error(), "unexpected status {status}");
}

#[tokio::test]
async fn status_update_touches_nothing_else() {
    let test_app = spawn_app().await;
    let token = signup_and_token(&test_app.app).await;
    let customer_id = create_customer(&test_app, &token).await;

    let (_, order) = request(
        &test_app.app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "customer": customer_id,
            "width": 90.0,
            "height": 45.0,
            "ralCode": "RAL 7016",
            "glassColor": "smoked",
            "cost": 800.0,
            "price": 1300.0,
        })),
    )
    .await;
    let id = order["id"].as_str().expect("order id");

    let (_, updated) = request(
        &test_app.app,
        "PATCH",
        &format!("/api/orders/{id}/status"),
        Some(&token),
        Some(json!({"status": "production"})),
    )
    .await;

    assert_eq!(updated["status"], "production");
    assert_eq!(updated["cost"], order["cost"]);
    assert_eq!(updated["price"], order["price"]);
    assert_eq!(updated["ralCode"], order["ralCode"]);
    assert_eq!(updated["glassColor"], order["glassColor"]);
    assert_eq!(updated["width"], order["width"]);
    assert_eq!(updated["height"], order["height"]);
}

#[tokio::test]
async fn update_merges_only_provided_fields() {
    let test_app = spawn_app().await;
    let token = signup_and_token(&test_app.app).await;
    let customer_id = create_customer(&test_app, &token).await;

    let (_, order) = request(
        &test_app.app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "customer": customer_id,
            "width": 110.0,
            "height": 70.0,
            "cost": 900.0,
            "price": 1500.0,
        })),
    )
    .await;
    let id = order["id"].as_str().expect("order id");

    let (status, updated) = request(
        &test_app.app,
        "PUT",
        &format!("/api/orders/{id}"),
        Some(&token),
        Some(json!({"price": 1750.0, "description": "tempered glass upgrade"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], json!(1750.0));
    assert_eq!(updated["description"], "tempered glass upgrade");
    assert_eq!(updated["cost"], json!(900.0));
    assert_eq!(updated["width"], json!(110.0));

    // Unknown order id reports not-found
    let (status, _) = request(
        &test_app.app,
        "PUT",
        "/api/orders/order:doesnotexist",
        Some(&token),
        Some(json!({"price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_order_disappears_from_lists() {
    let test_app = spawn_app().await;
    let token = signup_and_token(&test_app.app).await;
    let customer_id = create_customer(&test_app, &token).await;

    let (_, order) = request(
        &test_app.app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "customer": customer_id,
            "width": 50.0,
            "height": 50.0,
            "cost": 200.0,
            "price": 380.0,
        })),
    )
    .await;
    let id = order["id"].as_str().expect("order id");

    let (status, _) = request(
        &test_app.app,
        "DELETE",
        &format!("/api/orders/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, orders) = request(&test_app.app, "GET", "/api/orders", Some(&token), None).await;
    assert_eq!(orders, json!([]));

    let (status, _) = request(
        &test_app.app,
        "DELETE",
        &format!("/api/orders/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
