// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment route tests against the offline test app.
//!
//! Request validation runs before any provider or store call, so these
//! paths are fully exercisable without an emulator; the unreachable Stripe
//! endpoint covers the provider-failure path.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_payment_intent_rejects_zero_price() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "/create-payment-intent",
            serde_json::json!({ "price": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_payment_intent_rejects_oversized_price() {
    let (app, _) = common::create_test_app();

    // Far beyond any chargeable amount; must fail validation, not wrap or
    // panic in the minor-unit conversion.
    let response = app
        .oneshot(json_request(
            "/create-payment-intent",
            serde_json::json!({ "price": u64::MAX }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_payment_intent_provider_unreachable() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "/create-payment-intent",
            serde_json::json!({ "price": 50 }),
        ))
        .await
        .unwrap();

    // Validation passed; the provider call fails and surfaces as 502.
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_submit_payment_rejects_empty_ids() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "/payments",
            serde_json::json!({
                "bookingId": "",
                "transactionId": "pi_123",
                "email": "a@x.com",
                "price": 50,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_payment_offline_store_fails_closed() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "/payments",
            serde_json::json!({
                "bookingId": "B1",
                "transactionId": "pi_123",
                "email": "a@x.com",
                "price": 50,
            }),
        ))
        .await
        .unwrap();

    // Storage failure aborts the whole reconciliation.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
