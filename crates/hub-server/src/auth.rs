//! Request Authentication
//!
//! Sessions are issued by an external auth system; this module only
//! resolves the bearer token carried on the request to a local user.

use axum::http::{HeaderMap, header::AUTHORIZATION};

use hub_core::{AuthUser, UserStore};

use crate::error::ApiError;

/// Resolve the request's bearer token to a user, or fail with 401
pub fn authenticate(headers: &HeaderMap, users: &dyn UserStore) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;

    users
        .get_by_token(token)
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or(ApiError::Unauthorized)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
