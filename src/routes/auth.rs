// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token issuance and sign-in upsert routes.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::{Role, User};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jwt", get(issue_token))
        .route("/users", post(sign_in_upsert))
}

/// Query parameters for token issuance.
#[derive(Deserialize)]
pub struct TokenParams {
    email: String,
}

/// Issued token response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

/// Issue an identity token for a known user.
///
/// Tokens are only handed out to subjects with an existing user record, so a
/// sign-in upsert must happen first. Unknown subjects get a 403.
async fn issue_token(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TokenParams>,
) -> Result<Json<TokenResponse>> {
    let user = state.db.get_user(&params.email).await?;

    if user.is_none() {
        tracing::debug!(email = %params.email, "Token requested for unknown subject");
        return Err(AppError::Forbidden("unknown subject".to_string()));
    }

    let token = create_jwt(&params.email, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok(Json(TokenResponse {
        access_token: token,
    }))
}

/// Sign-in upsert payload.
#[derive(Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = 1))]
    name: String,
}

/// Create a user record on first sign-in, or refresh the profile on a
/// repeat sign-in. The role field is never touched here; role changes go
/// through the explicit assignment route.
async fn sign_in_upsert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<User>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = match state.db.get_user(&payload.email).await? {
        Some(mut existing) => {
            existing.name = payload.name;
            existing
        }
        None => {
            tracing::info!(email = %payload.email, "Creating user on first sign-in");
            User {
                email: payload.email,
                name: payload.name,
                role: Role::Unset,
                created_at: chrono::Utc::now().to_rfc3339(),
            }
        }
    };

    state.db.upsert_user(&user).await?;

    Ok(Json(user))
}
