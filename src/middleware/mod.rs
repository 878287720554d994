// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (authentication, role gating).

pub mod auth;
pub mod role;

pub use auth::require_auth;
pub use role::require_admin;
