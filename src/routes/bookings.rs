// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking routes (owner-scoped).

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Booking;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/bookings", get(list_bookings).post(create_booking))
}

/// Query parameters for the owner-scoped booking list.
#[derive(Deserialize)]
struct BookingsQuery {
    email: String,
}

/// List bookings owned by the queried email.
///
/// The queried owner must match the authenticated subject; authentication
/// alone does not grant access to another subject's bookings.
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>> {
    if params.email != user.email {
        tracing::debug!(
            subject = %user.email,
            queried = %params.email,
            "Owner mismatch on booking list"
        );
        return Err(AppError::Forbidden("owner mismatch".to_string()));
    }

    let bookings = state.db.bookings_for_owner(&params.email).await?;
    Ok(Json(bookings))
}

/// Booking creation payload.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateBookingRequest {
    #[validate(length(min = 1))]
    bike_id: String,
    bike_name: String,
    #[validate(range(min = 1))]
    price: u64,
}

/// Create a booking owned by the authenticated subject.
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<Booking>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        email: user.email,
        bike_id: payload.bike_id,
        bike_name: payload.bike_name,
        price: payload.price,
        paid: false,
        transaction_id: None,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.db.insert_booking(&booking).await?;

    tracing::info!(
        booking_id = %booking.id,
        email = %booking.email,
        bike_id = %booking.bike_id,
        "Booking created"
    );

    Ok(Json(booking))
}
