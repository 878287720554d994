//! Database layer (Firestore).

pub mod firestore;

pub use firestore::{BookingState, FirestoreDb};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const BOOKINGS: &str = "bookings";
    /// Payment records (keyed by provider transaction id)
    pub const PAYMENTS: &str = "payments";
}
