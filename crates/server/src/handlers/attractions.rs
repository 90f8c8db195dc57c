//! Attraction handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::AppState;
use wayfare_common::{
    db::Repository,
    errors::{AppError, Result},
    models::Attraction,
};

const MAX_LIMIT: u64 = 1000;

#[derive(Debug, Deserialize)]
pub struct ListAttractionsQuery {
    /// Category filter; "All" (or absence) means unfiltered
    pub category: Option<String>,

    /// Case-insensitive substring match on the location label
    pub location: Option<String>,

    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    MAX_LIMIT
}

/// List attractions with optional filtering
pub async fn list_attractions(
    State(state): State<AppState>,
    Query(query): Query<ListAttractionsQuery>,
) -> Result<Json<Vec<Attraction>>> {
    let category = super::category_param(query.category.as_deref())?;
    let limit = query.limit.min(MAX_LIMIT);

    let repo = Repository::new(state.db.clone());
    let rows = repo
        .list_attractions(category, query.location.as_deref(), limit)
        .await?;

    Ok(Json(rows.into_iter().map(Attraction::from).collect()))
}

/// Get a single attraction by ID
pub async fn get_attraction(
    State(state): State<AppState>,
    Path(attraction_id): Path<String>,
) -> Result<Json<Attraction>> {
    let repo = Repository::new(state.db.clone());

    let row = repo
        .find_attraction(&attraction_id)
        .await?
        .ok_or_else(|| AppError::AttractionNotFound {
            id: attraction_id.clone(),
        })?;

    Ok(Json(row.into()))
}
