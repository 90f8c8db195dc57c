//! Bearer-token utilities
//!
//! Sessions are created by exchanging a one-time code with the external
//! identity provider; the token we issue in return is opaque. Only its hash
//! is stored, so a leaked sessions table cannot be replayed.

use crate::errors::{AppError, Result};
use axum::{extract::FromRequestParts, http::request::Parts};
use sha2::{Digest, Sha256};

/// Generate an opaque session token
pub fn generate_session_token() -> String {
    let random_bytes: [u8; 32] = rand::random();
    format!("wf_{}", hex::encode(random_bytes))
}

/// Hash a session token for storage
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the token from an Authorization header value
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Axum extractor for the raw bearer token.
///
/// Handlers that need an authenticated user resolve this against the
/// sessions table; the extractor only guarantees the header was present
/// and well-formed.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized {
                message: "Missing Authorization header".to_string(),
            })?;

        let token = extract_bearer(header).ok_or(AppError::InvalidToken)?;

        Ok(BearerToken(token.to_string()))
    }
}
