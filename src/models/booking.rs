// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking model.

use serde::{Deserialize, Serialize};

/// A booking for a listed bike, stored in Firestore.
///
/// `paid` and `transaction_id` are written only by the reconciler, and a
/// booking never transitions back to unpaid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Document ID
    pub id: String,
    /// Owning subject's email
    pub email: String,
    /// Listed bike this booking refers to
    pub bike_id: String,
    /// Denormalized bike name for display
    pub bike_name: String,
    /// Price in major currency units
    pub price: u64,
    /// Whether payment has completed
    #[serde(default)]
    pub paid: bool,
    /// Provider transaction id, set when the booking is marked paid
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// When the booking was created (RFC 3339)
    pub created_at: String,
}

/// How a payment submission should be applied to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaidDisposition {
    /// Booking is unpaid; transition it.
    Apply,
    /// Booking already paid by this same transaction; no-op.
    Duplicate,
    /// Booking already paid by a different transaction.
    Conflict,
}

impl Booking {
    /// Decide how a payment with the given transaction id applies to this
    /// booking. Pure compare-and-swap predicate; the reconciler performs the
    /// matching writes inside a transaction.
    pub fn paid_disposition(&self, transaction_id: &str) -> PaidDisposition {
        if !self.paid {
            PaidDisposition::Apply
        } else if self.transaction_id.as_deref() == Some(transaction_id) {
            PaidDisposition::Duplicate
        } else {
            PaidDisposition::Conflict
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(paid: bool, transaction_id: Option<&str>) -> Booking {
        Booking {
            id: "B1".to_string(),
            email: "a@x.com".to_string(),
            bike_id: "bike-9".to_string(),
            bike_name: "Trek 520".to_string(),
            price: 50,
            paid,
            transaction_id: transaction_id.map(String::from),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_unpaid_booking_applies() {
        assert_eq!(
            booking(false, None).paid_disposition("pi_123"),
            PaidDisposition::Apply
        );
    }

    #[test]
    fn test_same_transaction_is_duplicate() {
        assert_eq!(
            booking(true, Some("pi_123")).paid_disposition("pi_123"),
            PaidDisposition::Duplicate
        );
    }

    #[test]
    fn test_different_transaction_is_conflict() {
        assert_eq!(
            booking(true, Some("pi_123")).paid_disposition("pi_456"),
            PaidDisposition::Conflict
        );
    }

    #[test]
    fn test_paid_without_transaction_id_never_retransitions() {
        // A paid booking with no recorded transaction id still refuses a
        // new transition.
        assert_eq!(
            booking(true, None).paid_disposition("pi_123"),
            PaidDisposition::Conflict
        );
    }
}
