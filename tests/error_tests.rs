// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error-to-status mapping tests.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use bike_bazar::error::AppError;

fn status_of(err: AppError) -> StatusCode {
    err.into_response().status()
}

#[test]
fn test_auth_errors_map_to_401_and_403() {
    assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
    assert_eq!(
        status_of(AppError::Forbidden("owner mismatch".to_string())),
        StatusCode::FORBIDDEN
    );
}

#[test]
fn test_client_errors() {
    assert_eq!(
        status_of(AppError::NotFound("booking B1".to_string())),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        status_of(AppError::BadRequest("price must be positive".to_string())),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn test_upstream_errors() {
    // Provider failures are the provider's fault: 502
    assert_eq!(
        status_of(AppError::Stripe("connection refused".to_string())),
        StatusCode::BAD_GATEWAY
    );
    // Storage failures are ours: 500
    assert_eq!(
        status_of(AppError::Database("offline".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_of(AppError::Internal(anyhow::anyhow!("boom"))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
