// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User role routes: role checks, buyer assignment, admin-gated deletion.

use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::Role;
use crate::AppState;

/// Routes available to any authenticated subject.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/seller/{email}", get(check_seller))
        .route("/users/admin/{email}", get(check_admin))
        .route("/users/buyer/{email}", put(assign_buyer))
}

/// Routes gated on the admin role (middleware applied in routes/mod.rs).
pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/users/{email}", delete(delete_user))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerCheckResponse {
    pub is_seller: bool,
}

/// Check whether a subject has the seller role.
///
/// A missing user record reads as role unset, so the answer is simply false.
async fn check_seller(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<SellerCheckResponse>> {
    let role = state.db.role_of(&email).await?;
    Ok(Json(SellerCheckResponse {
        is_seller: role == Role::Seller,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckResponse {
    pub is_admin: bool,
}

/// Check whether a subject has the admin role.
async fn check_admin(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<AdminCheckResponse>> {
    let role = state.db.role_of(&email).await?;
    Ok(Json(AdminCheckResponse {
        is_admin: role == Role::Admin,
    }))
}

#[derive(Serialize)]
pub struct RoleAssignResponse {
    pub success: bool,
    pub role: Role,
}

/// Assign the buyer role to an existing user.
async fn assign_buyer(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<RoleAssignResponse>> {
    state.db.set_user_role(&email, Role::Buyer).await?;

    tracing::info!(email = %email, "Buyer role assigned");

    Ok(Json(RoleAssignResponse {
        success: true,
        role: Role::Buyer,
    }))
}

#[derive(Serialize)]
pub struct DeleteUserResponse {
    pub success: bool,
}

/// Delete a user document. Admin only.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<DeleteUserResponse>> {
    state.db.delete_user(&email).await?;

    tracing::info!(email = %email, "User deleted by admin");

    Ok(Json(DeleteUserResponse { success: true }))
}
