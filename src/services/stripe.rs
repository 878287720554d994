// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripe API client for creating payment intents.
//!
//! The two-phase payment flow starts here: an intent is registered with
//! Stripe for a given amount and the client secret is handed back to the
//! caller, who completes the charge out-of-band and then submits the result
//! to `/payments`.

use crate::error::AppError;
use serde::Deserialize;
use std::time::Duration;

/// Per-request timeout for Stripe calls.
const STRIPE_TIMEOUT: Duration = Duration::from_secs(15);

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

/// Payment intent response from Stripe (the fields we use).
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Convert a major-unit price to the minor units Stripe expects.
///
/// Returns `None` when the conversion would overflow.
pub fn minor_units(amount_major: u64) -> Option<u64> {
    amount_major.checked_mul(100)
}

impl StripeClient {
    /// Create a new Stripe client with the account's secret key.
    pub fn new(secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.stripe.com".to_string(),
            secret_key,
        }
    }

    /// Override the API base URL (for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Register a payment intent for a card charge of `amount_major` major
    /// currency units and return its client secret.
    ///
    /// The intent id is not persisted here; the caller echoes it back as the
    /// transaction id when submitting the completed payment.
    pub async fn create_payment_intent(&self, amount_major: u64) -> Result<PaymentIntent, AppError> {
        let url = format!("{}/v1/payment_intents", self.base_url);
        let amount = minor_units(amount_major)
            .ok_or_else(|| AppError::BadRequest(format!("Price {} out of range", amount_major)))?;

        let response = self
            .http
            .post(&url)
            .timeout(STRIPE_TIMEOUT)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.to_string()),
                ("currency", "usd".to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Stripe(format!("Payment intent request failed: {}", e)))?;

        let intent: PaymentIntent = self.check_response_json(response).await?;

        tracing::info!(
            intent_id = %intent.id,
            amount_minor = amount,
            "Payment intent created"
        );

        Ok(intent)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Stripe(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Stripe(format!("JSON parse error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_conversion() {
        assert_eq!(minor_units(50), Some(5000));
        assert_eq!(minor_units(0), Some(0));
        assert_eq!(minor_units(1), Some(100));
    }

    #[test]
    fn test_minor_units_overflow_rejected() {
        assert_eq!(minor_units(u64::MAX), None);
        assert_eq!(minor_units(u64::MAX / 100 + 1), None);
        assert_eq!(minor_units(u64::MAX / 100), Some(u64::MAX / 100 * 100));
    }

    #[test]
    fn test_base_url_override() {
        let client = StripeClient::new("sk_test_dummy".to_string())
            .with_base_url("http://localhost:12111");
        assert_eq!(client.base_url, "http://localhost:12111");
    }
}
