// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bike Bazar: resale marketplace backend.
//!
//! This crate provides the backend API for the used-bike resale market:
//! token-based identity, role-gated access control, bookings, and the
//! Stripe payment flow with booking/payment reconciliation.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::StripeClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub stripe: StripeClient,
}
