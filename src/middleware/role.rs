// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role-gating middleware.
//!
//! Runs after `require_auth` and re-reads the subject's role on every
//! request. There is no role cache: an assignment or demotion takes effect
//! on the very next request.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::Role;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires the authenticated subject to be an admin.
///
/// A missing user record reads as role `unset`, which never satisfies the
/// requirement; the lookup itself only fails the request on a storage error.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    let role = state.db.role_of(&user.email).await?;
    if role != Role::Admin {
        tracing::debug!(email = %user.email, ?role, "Admin gate rejected subject");
        return Err(AppError::Forbidden("admin role required".to_string()));
    }

    Ok(next.run(request).await)
}
