//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo test -- --ignored`

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}+{}@example.com", prefix, nanos)
}

/// Register a fresh account and return (token, user id)
async fn register_user(client: &Client, name: &str, role: &str) -> (String, i64) {
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": name,
            "email": unique_email(name),
            "password": "password123",
            "role": role
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse register response");
    let token = body["token"].as_str().expect("No token in response").to_string();
    let user_id = body["user"]["id"].as_i64().expect("No user id in response");
    (token, user_id)
}

/// Create a listing and return its id
async fn create_item(client: &Client, token: &str, title: &str, price: i64, deposit: i64) -> i64 {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "description": "Integration test listing",
            "category": "Tools",
            "price": price,
            "deposit": deposit,
            "location": "Test City"
        }))
        .send()
        .await
        .expect("Failed to send create item request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse item response");
    body["item"]["id"].as_i64().expect("No item id in response")
}

fn decimal(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).expect("Not a decimal value")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let email = unique_email("login-test");

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Login Test",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "password123" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["role"], "renter");

    // Wrong password is rejected
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email() {
    let client = Client::new();
    let email = unique_email("dup-test");

    for expected in [201, 400] {
        let response = client
            .post(format!("{}/auth/register", BASE_URL))
            .json(&json!({
                "name": "Dup Test",
                "email": email,
                "password": "password123"
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
#[ignore]
async fn test_unavailable_items_hidden_from_directory() {
    let client = Client::new();
    let (token, _) = register_user(&client, "lister", "owner").await;

    let title = format!("Hidden drill {}", unique_email("x"));
    let item_id = create_item(&client, &token, &title, 30, 0).await;

    // Flip availability off
    let response = client
        .put(format!("{}/items/{}", BASE_URL, item_id))
        .bearer_auth(&token)
        .json(&json!({ "available": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Gone from the public directory
    let response = client
        .get(format!("{}/items", BASE_URL))
        .query(&[("search", title.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 0);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);

    // Still reachable directly by id
    let response = client
        .get(format!("{}/items/{}", BASE_URL, item_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle() {
    let client = Client::new();
    let (owner_token, _) = register_user(&client, "lifecycle-owner", "owner").await;
    let (renter_token, _) = register_user(&client, "lifecycle-renter", "renter").await;

    let item_id = create_item(&client, &owner_token, "Pressure washer", 100, 20).await;

    let start = Utc::now();
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({ "item": item_id, "startDate": start }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let booking = &body["booking"];
    let booking_id = booking["id"].as_i64().expect("No booking id");

    // Snapshot pricing: 100 + 20
    assert_eq!(decimal(&booking["rentalPrice"]), Decimal::from(100));
    assert_eq!(decimal(&booking["deposit"]), Decimal::from(20));
    assert_eq!(decimal(&booking["totalAmount"]), Decimal::from(120));
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["paymentStatus"], "pending");

    // Fixed 24-hour window
    let start_date: DateTime<Utc> = serde_json::from_value(booking["startDate"].clone()).unwrap();
    let end_date: DateTime<Utc> = serde_json::from_value(booking["endDate"].clone()).unwrap();
    assert_eq!(end_date - start_date, Duration::hours(24));

    // Raising the item price later must not change the snapshot
    let response = client
        .put(format!("{}/items/{}", BASE_URL, item_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "price": 500 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking_id))
        .bearer_auth(&renter_token)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(decimal(&body["booking"]["totalAmount"]), Decimal::from(120));

    // Renter cannot confirm
    let response = client
        .put(format!("{}/bookings/{}/confirm", BASE_URL, booking_id))
        .bearer_auth(&renter_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Owner confirms
    let response = client
        .put(format!("{}/bookings/{}/confirm", BASE_URL, booking_id))
        .bearer_auth(&owner_token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "confirmed");

    // Renter can still cancel after confirmation
    let response = client
        .put(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .bearer_auth(&renter_token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "cancelled");
}

#[tokio::test]
#[ignore]
async fn test_complete_requires_owner() {
    let client = Client::new();
    let (owner_token, _) = register_user(&client, "complete-owner", "owner").await;
    let (renter_token, _) = register_user(&client, "complete-renter", "renter").await;

    let item_id = create_item(&client, &owner_token, "Ladder", 15, 5).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({ "item": item_id, "startDate": Utc::now() }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/bookings/{}/complete", BASE_URL, booking_id))
        .bearer_auth(&renter_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .put(format!("{}/bookings/{}/complete", BASE_URL, booking_id))
        .bearer_auth(&owner_token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "completed");
}

#[tokio::test]
#[ignore]
async fn test_booking_missing_or_unavailable_item() {
    let client = Client::new();
    let (owner_token, _) = register_user(&client, "gap-owner", "owner").await;
    let (renter_token, _) = register_user(&client, "gap-renter", "renter").await;

    // Missing item
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({ "item": 99999999, "startDate": Utc::now() }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Unavailable item
    let item_id = create_item(&client, &owner_token, "Parked van", 80, 0).await;
    let response = client
        .put(format!("{}/items/{}", BASE_URL, item_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "available": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({ "item": item_id, "startDate": Utc::now() }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_bookings_both_succeed() {
    // Availability is not flipped by booking and creation is not atomic,
    // so two requests for the same item both go through.
    let client = Client::new();
    let (owner_token, _) = register_user(&client, "race-owner", "owner").await;
    let (renter_a, _) = register_user(&client, "race-renter-a", "renter").await;
    let (renter_b, _) = register_user(&client, "race-renter-b", "renter").await;

    let item_id = create_item(&client, &owner_token, "Projector", 40, 10).await;
    let start = Utc::now();

    let book = |token: String| {
        let client = client.clone();
        async move {
            client
                .post(format!("{}/bookings", BASE_URL))
                .bearer_auth(token)
                .json(&json!({ "item": item_id, "startDate": start }))
                .send()
                .await
                .expect("Failed to send request")
        }
    };

    let (first, second) = tokio::join!(book(renter_a), book(renter_b));

    assert_eq!(first.status(), 201);
    assert_eq!(second.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_item_update_requires_owner() {
    let client = Client::new();
    let (owner_token, _) = register_user(&client, "authz-owner", "owner").await;
    let (stranger_token, _) = register_user(&client, "authz-stranger", "renter").await;

    let item_id = create_item(&client, &owner_token, "Sander", 25, 0).await;

    let response = client
        .put(format!("{}/items/{}", BASE_URL, item_id))
        .bearer_auth(&stranger_token)
        .json(&json!({ "price": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .delete(format!("{}/items/{}", BASE_URL, item_id))
        .bearer_auth(&stranger_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_bookings_require_authentication() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_booking_list_by_role() {
    let client = Client::new();
    let (owner_token, _) = register_user(&client, "list-owner", "owner").await;
    let (renter_token, _) = register_user(&client, "list-renter", "renter").await;

    let item_id = create_item(&client, &owner_token, "Canoe", 60, 15).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .json(&json!({ "item": item_id, "startDate": Utc::now() }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Renter sees it under the default role
    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .bearer_auth(&renter_token)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body["bookings"].as_array().unwrap().is_empty());

    // Owner sees it under role=owner
    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .bearer_auth(&owner_token)
        .query(&[("role", "owner"), ("status", "pending")])
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body["bookings"].as_array().unwrap().is_empty());

    // Owner as renter sees nothing
    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .bearer_auth(&owner_token)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["bookings"].as_array().unwrap().is_empty());
}
