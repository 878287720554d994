// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod booking;
pub mod payment;
pub mod user;

pub use booking::Booking;
pub use payment::Payment;
pub use user::{Role, User};
