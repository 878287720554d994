// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment record model.

use serde::{Deserialize, Serialize};

/// A completed payment reported by the client after the Stripe flow.
///
/// Append-only; stored with the transaction id as the document ID so each
/// provider transaction maps to at most one record. A stored record is never
/// replaced: duplicate submissions are no-ops and a transaction id cannot be
/// repointed at another booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Booking this payment pays for
    pub booking_id: String,
    /// Stripe payment intent id
    pub transaction_id: String,
    /// Paying subject's email
    pub email: String,
    /// Amount in major currency units
    pub amount: u64,
    /// True when no unpaid booking matched at reconcile time; kept for audit
    #[serde(default)]
    pub orphaned: bool,
    /// When the payment was recorded (RFC 3339)
    pub created_at: String,
}
