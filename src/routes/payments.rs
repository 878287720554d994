// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment routes: intent creation and completed-payment reconciliation.
//!
//! Two-phase flow: the client first asks for a payment intent and receives
//! the Stripe client secret, completes the charge against Stripe directly,
//! then submits the result here so the booking can be marked paid.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::db::BookingState;
use crate::error::{AppError, Result};
use crate::models::Payment;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(submit_payment))
}

/// Payment intent request: price in major currency units.
///
/// Stripe caps card charges at eight digits of minor units, so the price is
/// bounded well before the minor-unit conversion could overflow.
#[derive(Deserialize, Validate)]
pub struct CreateIntentRequest {
    #[validate(range(min = 1, max = 999_999))]
    price: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

/// Register a payment intent with Stripe and return its client secret.
async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let intent = state.stripe.create_payment_intent(payload.price).await?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Completed payment submission.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaymentRequest {
    #[validate(length(min = 1))]
    booking_id: String,
    #[validate(length(min = 1))]
    transaction_id: String,
    #[validate(email)]
    email: String,
    price: u64,
}

/// Reconciliation receipt: reports both the payment insert and the booking
/// transition, so a partial completion is visible to the caller.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub booking_id: String,
    pub booking: &'static str,
}

/// Persist a completed payment and mark its booking paid.
///
/// Duplicate submissions with the same booking and transaction ids are
/// accepted and reported as `already_paid` with no further side effect.
async fn submit_payment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitPaymentRequest>,
) -> Result<Json<PaymentReceipt>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let payment = Payment {
        booking_id: payload.booking_id,
        transaction_id: payload.transaction_id,
        email: payload.email,
        amount: payload.price,
        orphaned: false,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    let booking = match state.db.reconcile_payment(&payment).await? {
        BookingState::Paid => "paid",
        BookingState::AlreadyPaid => "already_paid",
        BookingState::Missing => {
            return Err(AppError::NotFound(format!(
                "Booking {} not found; payment recorded as orphaned",
                payment.booking_id
            )))
        }
        BookingState::Conflict => {
            return Err(AppError::BadRequest(format!(
                "Booking {} is already paid or the transaction id is already used",
                payment.booking_id
            )))
        }
    };

    Ok(Json(PaymentReceipt {
        transaction_id: payment.transaction_id,
        booking_id: payment.booking_id,
        booking,
    }))
}
