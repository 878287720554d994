// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity token codec tests.
//!
//! These tests verify that tokens issued by `create_jwt` verify back to the
//! same subject, and that expired or forged tokens are rejected.

use bike_bazar::error::AppError;
use bike_bazar::middleware::auth::{create_jwt, verify_jwt, Claims, TOKEN_VALIDITY_SECS};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

fn unix_now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[test]
fn test_issue_verify_roundtrip() {
    let token = create_jwt("a@x.com", SIGNING_KEY).unwrap();
    let subject = verify_jwt(&token, SIGNING_KEY).expect("freshly issued token should verify");
    assert_eq!(subject, "a@x.com");
}

#[test]
fn test_token_validity_is_ten_days() {
    let token = create_jwt("a@x.com", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    assert_eq!(
        token_data.claims.exp - token_data.claims.iat,
        TOKEN_VALIDITY_SECS
    );
    assert_eq!(TOKEN_VALIDITY_SECS, 10 * 24 * 60 * 60);
}

#[test]
fn test_expired_token_rejected() {
    // Hand-craft a token whose expiry is well past the default leeway.
    let now = unix_now();
    let claims = Claims {
        sub: "a@x.com".to_string(),
        iat: now - 2 * TOKEN_VALIDITY_SECS,
        exp: now - TOKEN_VALIDITY_SECS,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    let err = verify_jwt(&token, SIGNING_KEY).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test]
fn test_wrong_key_rejected() {
    let token = create_jwt("a@x.com", SIGNING_KEY).unwrap();
    let err = verify_jwt(&token, b"a_completely_different_key_here!").unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test]
fn test_malformed_token_rejected() {
    let err = verify_jwt("not.a.jwt", SIGNING_KEY).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = verify_jwt("", SIGNING_KEY).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
