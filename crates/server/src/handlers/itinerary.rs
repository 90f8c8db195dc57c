//! Itinerary generation handler
//!
//! The one write path whose failure must reach the caller: the screen
//! behind it shows an explicit error state, so a delegated-service failure
//! propagates as 502 instead of degrading to an empty body.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::time::Instant;
use validator::Validate;

use crate::AppState;
use wayfare_common::{
    db::Repository,
    errors::{AppError, Result},
    metrics,
    models::{Budget, Category, Itinerary},
};

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateItineraryRequest {
    /// Interests drawn from the category vocabulary
    #[validate(length(min = 1, message = "at least one interest is required"))]
    pub interests: Vec<Category>,

    /// Trip length in days
    #[validate(range(min = 1, max = 14))]
    pub duration: u32,

    pub budget: Budget,

    #[serde(default)]
    pub user_id: Option<String>,
}

/// Generate a personalized itinerary via the external generation service
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateItineraryRequest>,
) -> Result<Json<Itinerary>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let start = Instant::now();
    let generated = state
        .generator
        .generate(&request.interests, request.duration, request.budget)
        .await;
    metrics::record_generation(start.elapsed().as_secs_f64(), generated.is_ok());

    let text = generated?;

    let repo = Repository::new(state.db.clone());
    let row = repo
        .insert_itinerary(
            request.user_id.as_deref(),
            &text,
            &request.interests,
            request.duration,
            request.budget.as_str(),
        )
        .await?;

    tracing::info!(
        itinerary_id = %row.id,
        duration = request.duration,
        budget = %request.budget.as_str(),
        "Itinerary generated"
    );

    Ok(Json(Itinerary::from(row)))
}
