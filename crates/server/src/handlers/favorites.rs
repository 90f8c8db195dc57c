//! Favorites handlers
//!
//! The only client-initiated mutation path in the API. Adding is
//! idempotent; removing a missing row is a 404 the SDK maps to `false`.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::AppState;
use wayfare_common::{
    db::Repository,
    errors::{AppError, Result},
    models::{Attraction, Favorite, FavoriteCreate},
};

#[derive(Serialize)]
pub struct RemoveFavoriteResponse {
    pub message: &'static str,
}

/// Add an attraction to a user's favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(request): Json<FavoriteCreate>,
) -> Result<Json<Favorite>> {
    if request.user_id.is_empty() {
        return Err(AppError::MissingField {
            field: "user_id".to_string(),
        });
    }
    if request.attraction_id.is_empty() {
        return Err(AppError::MissingField {
            field: "attraction_id".to_string(),
        });
    }

    let repo = Repository::new(state.db.clone());
    let row = repo
        .add_favorite(&request.user_id, &request.attraction_id)
        .await?;

    tracing::info!(
        user_id = %request.user_id,
        attraction_id = %request.attraction_id,
        "Favorite added"
    );

    Ok(Json(row.into()))
}

/// List a user's favorite attractions
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Attraction>>> {
    let repo = Repository::new(state.db.clone());
    let rows = repo.list_favorite_attractions(&user_id).await?;

    Ok(Json(rows.into_iter().map(Attraction::from).collect()))
}

/// Remove an attraction from a user's favorites
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((user_id, attraction_id)): Path<(String, String)>,
) -> Result<Json<RemoveFavoriteResponse>> {
    let repo = Repository::new(state.db.clone());

    let removed = repo.remove_favorite(&user_id, &attraction_id).await?;
    if !removed {
        return Err(AppError::FavoriteNotFound {
            user_id,
            attraction_id,
        });
    }

    tracing::info!(
        user_id = %user_id,
        attraction_id = %attraction_id,
        "Favorite removed"
    );

    Ok(Json(RemoveFavoriteResponse {
        message: "Favorite removed successfully",
    }))
}
