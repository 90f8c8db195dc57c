//! Session handlers
//!
//! Authentication is delegated: a one-time code from the external identity
//! provider is exchanged for an opaque token we issue, and /auth/me probes
//! that token. Only the token hash ever touches the database.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::AppState;
use wayfare_common::{
    auth::{generate_session_token, hash_token, BearerToken},
    db::Repository,
    errors::{AppError, Result},
    metrics,
    models::{SessionHandshake, UserProfile},
};

#[derive(Debug, Deserialize)]
pub struct ExchangeQuery {
    pub session_id: String,
}

/// Exchange a one-time code for a bearer token and profile
pub async fn exchange_session(
    State(state): State<AppState>,
    Query(query): Query<ExchangeQuery>,
) -> Result<Json<SessionHandshake>> {
    if query.session_id.is_empty() {
        return Err(AppError::MissingField {
            field: "session_id".to_string(),
        });
    }

    let exchanged = state.identity.exchange(&query.session_id).await;
    metrics::record_identity_exchange(exchanged.is_ok());
    let provider = exchanged?;

    let profile = UserProfile {
        id: provider.id,
        email: provider.email,
        name: provider.name,
        picture: provider.picture,
    };

    let token = generate_session_token();
    let repo = Repository::new(state.db.clone());
    let session = repo
        .create_session(
            &hash_token(&token),
            &profile,
            state.config.identity.session_ttl_days,
        )
        .await?;

    tracing::info!(user_id = %profile.id, "Session created");

    Ok(Json(SessionHandshake {
        token,
        user: profile,
        expires_at: session.expires_at.to_utc(),
    }))
}

/// Identity probe. Success refreshes the caller's cached profile; any
/// failure tells the client to drop its local session.
pub async fn me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<UserProfile>> {
    let repo = Repository::new(state.db.clone());

    let session = repo
        .find_session(&hash_token(&token))
        .await?
        .ok_or(AppError::SessionNotFound)?;

    if session.is_expired() {
        // Expired rows are dead weight; drop eagerly
        let _ = repo.delete_session(&session.token_hash).await;
        return Err(AppError::ExpiredSession);
    }

    let profile = session.user_profile().ok_or_else(|| AppError::Internal {
        message: "Stored profile failed to decode".to_string(),
    })?;

    Ok(Json(profile))
}

/// Destroy the caller's session
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());
    let removed = repo.delete_session(&hash_token(&token)).await?;

    if removed {
        tracing::info!("Session destroyed");
    }

    // Logout is idempotent; an already-gone session is still a success
    Ok(StatusCode::NO_CONTENT)
}
