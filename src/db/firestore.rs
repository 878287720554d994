// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile + role storage)
//! - Bookings (owner-scoped bike bookings)
//! - Payments (append-only payment records)
//!
//! The booking/payment reconciliation runs inside a Firestore transaction so
//! the paid transition happens exactly once under concurrent submissions.

use futures_util::FutureExt;

use crate::db::collections;
use crate::error::AppError;
use crate::models::booking::PaidDisposition;
use crate::models::{Booking, Payment, Role, User};

/// Outcome of the booking side of a payment reconciliation.
///
/// Returned alongside the payment-insert result so the caller can observe
/// both writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    /// Booking transitioned unpaid -> paid in this call.
    Paid,
    /// Booking was already paid by this same transaction (idempotent retry).
    AlreadyPaid,
    /// Booking was already paid by a different transaction, or the
    /// transaction id is already bound to a different booking. A payment
    /// with a fresh transaction id is stored as orphaned; an existing
    /// record is left untouched.
    Conflict,
    /// No booking with the given id; payment stored as orphaned.
    Missing,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by email (the document ID).
    pub async fn get_user(&self, email: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(email)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.email)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Look up a subject's role. Missing user reads as `Role::Unset`.
    ///
    /// Always a fresh read, so a role change takes effect on the next request.
    pub async fn role_of(&self, email: &str) -> Result<Role, AppError> {
        Ok(self
            .get_user(email)
            .await?
            .map(|u| u.role)
            .unwrap_or_default())
    }

    /// Assign a role to an existing user.
    pub async fn set_user_role(&self, email: &str, role: Role) -> Result<(), AppError> {
        let mut user = self
            .get_user(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", email)))?;
        user.role = role;
        self.upsert_user(&user).await
    }

    /// Delete a user document (admin-gated at the route layer).
    pub async fn delete_user(&self, email: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(email)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Booking Operations ──────────────────────────────────────

    /// Get a booking by ID.
    pub async fn get_booking(&self, booking_id: &str) -> Result<Option<Booking>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::BOOKINGS)
            .obj()
            .one(booking_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all bookings owned by an email, newest first.
    pub async fn bookings_for_owner(&self, email: &str) -> Result<Vec<Booking>, AppError> {
        let email = email.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::BOOKINGS)
            .filter(move |q| q.field("email").eq(email.clone()))
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a new booking.
    pub async fn insert_booking(&self, booking: &Booking) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::BOOKINGS)
            .document_id(&booking.id)
            .object(booking)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Payment Reconciliation ──────────────────────────────────

    /// Get a payment record by transaction id.
    pub async fn get_payment(&self, transaction_id: &str) -> Result<Option<Payment>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PAYMENTS)
            .obj()
            .one(transaction_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Atomically reconcile a completed payment with its booking.
    ///
    /// Runs inside `run_transaction`, so both reads below go through the
    /// transaction's consistency selector: if another request commits against
    /// the same booking first, our commit aborts and the closure re-runs with
    /// fresh data, where the loser observes an already-paid booking instead
    /// of double-transitioning.
    ///
    /// Payment records are single-use per transaction id. A submission that
    /// reuses an id already bound to a different booking is rejected without
    /// touching the stored record.
    ///
    /// A payment that matches no unpaid booking is still persisted (with the
    /// `orphaned` flag set) so the audit trail is fail-closed, and the booking
    /// outcome is reported to the caller rather than swallowed.
    pub async fn reconcile_payment(&self, payment: &Payment) -> Result<BookingState, AppError> {
        let client = self.get_client()?;
        let submitted = payment.clone();

        let state = client
            .run_transaction(|tdb, transaction| {
                let payment = submitted.clone();
                async move {
                    // A transaction id may never be repointed at another
                    // booking, so check the payment record first.
                    let existing: Option<Payment> = tdb
                        .fluent()
                        .select()
                        .by_id_in(collections::PAYMENTS)
                        .obj()
                        .one(&payment.transaction_id)
                        .await?;

                    if let Some(existing) = existing {
                        if existing.booking_id != payment.booking_id {
                            return Ok(BookingState::Conflict);
                        }
                    }

                    let booking: Option<Booking> = tdb
                        .fluent()
                        .select()
                        .by_id_in(collections::BOOKINGS)
                        .obj()
                        .one(&payment.booking_id)
                        .await?;

                    let Some(mut booking) = booking else {
                        return Ok(BookingState::Missing);
                    };

                    // Compare-and-swap on paid: false -> true
                    match booking.paid_disposition(&payment.transaction_id) {
                        PaidDisposition::Duplicate => Ok(BookingState::AlreadyPaid),
                        PaidDisposition::Conflict => Ok(BookingState::Conflict),
                        PaidDisposition::Apply => {
                            booking.paid = true;
                            booking.transaction_id = Some(payment.transaction_id.clone());

                            tdb.fluent()
                                .update()
                                .in_col(collections::PAYMENTS)
                                .document_id(&payment.transaction_id)
                                .object(&payment)
                                .add_to_transaction(transaction)?;

                            tdb.fluent()
                                .update()
                                .in_col(collections::BOOKINGS)
                                .document_id(&booking.id)
                                .object(&booking)
                                .add_to_transaction(transaction)?;

                            Ok(BookingState::Paid)
                        }
                    }
                }
                .boxed()
            })
            .await
            .map_err(|e| AppError::Database(format!("Reconcile transaction failed: {}", e)))?;

        match state {
            BookingState::Paid => {
                tracing::info!(
                    booking_id = %payment.booking_id,
                    transaction_id = %payment.transaction_id,
                    amount = payment.amount,
                    "Booking marked paid"
                );
            }
            BookingState::AlreadyPaid => {
                tracing::debug!(
                    booking_id = %payment.booking_id,
                    transaction_id = %payment.transaction_id,
                    "Payment already reconciled (idempotent skip)"
                );
            }
            BookingState::Conflict => {
                self.insert_orphaned_payment(payment).await?;
                tracing::warn!(
                    booking_id = %payment.booking_id,
                    transaction_id = %payment.transaction_id,
                    "Payment conflicts with an existing transaction, kept as orphaned if new"
                );
            }
            BookingState::Missing => {
                self.insert_orphaned_payment(payment).await?;
                tracing::warn!(
                    booking_id = %payment.booking_id,
                    transaction_id = %payment.transaction_id,
                    "Payment references unknown booking, stored as orphaned"
                );
            }
        }

        Ok(state)
    }

    /// Persist a payment with the orphaned flag set, only if no record exists
    /// for that transaction id yet. Existing records are never replaced.
    async fn insert_orphaned_payment(&self, payment: &Payment) -> Result<(), AppError> {
        if self.get_payment(&payment.transaction_id).await?.is_some() {
            return Ok(());
        }

        let mut orphaned = payment.clone();
        orphaned.orphaned = true;

        let result = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::PAYMENTS)
            .document_id(&payment.transaction_id)
            .object(&orphaned)
            .execute::<()>()
            .await;

        match result {
            Ok(()) => Ok(()),
            // Lost the race to another writer; the existing record stands.
            Err(firestore::errors::FirestoreError::DataConflictError(_)) => Ok(()),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }
}
