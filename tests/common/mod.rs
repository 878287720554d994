// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use bike_bazar::config::Config;
use bike_bazar::db::FirestoreDb;
use bike_bazar::routes::create_router;
use bike_bazar::services::StripeClient;
use bike_bazar::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with an offline mock database. Returns the router and
/// the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    build_app(config, db)
}

/// Create a test app backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db().await;
    build_app(config, db)
}

#[allow(dead_code)]
fn build_app(config: Config, db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    // Point Stripe at a closed local port so provider calls fail fast
    // instead of reaching the real API.
    let stripe =
        StripeClient::new(config.stripe_secret_key.clone()).with_base_url("http://127.0.0.1:1");

    let state = Arc::new(AppState { config, db, stripe });

    (create_router(state.clone()), state)
}
