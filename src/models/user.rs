//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// A subject's role, gating which operations they may perform.
///
/// Users created by the sign-in upsert start with no role; a missing user
/// record also reads as `Unset`, which never satisfies a role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Unset,
    Buyer,
    Seller,
    Admin,
}

/// User profile stored in Firestore (document ID = email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Email address, unique, doubles as the token subject
    pub email: String,
    /// Display name
    pub name: String,
    /// Role, mutated only via explicit role assignment
    #[serde(default)]
    pub role: Role,
    /// When the user first signed in (RFC 3339)
    pub created_at: String,
}
