//! Event handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::AppState;
use wayfare_common::{
    db::Repository,
    errors::{AppError, Result},
    models::Event,
};

const MAX_LIMIT: u64 = 1000;

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub category: Option<String>,

    /// Earliest start date to include (ISO-8601)
    pub start_date: Option<DateTime<Utc>>,

    /// Latest start date to include (ISO-8601); both bounds apply to the
    /// event's start date
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

/// List events ordered by start date, with optional filtering
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>> {
    let category = super::category_param(query.category.as_deref())?;
    let limit = query.limit.min(MAX_LIMIT);

    let repo = Repository::new(state.db.clone());
    let rows = repo
        .list_events(category, query.start_date, query.end_date, limit)
        .await?;

    Ok(Json(rows.into_iter().map(Event::from).collect()))
}

/// Get a single event by ID
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>> {
    let repo = Repository::new(state.db.clone());

    let row = repo
        .find_event(&event_id)
        .await?
        .ok_or_else(|| AppError::EventNotFound {
            id: event_id.clone(),
        })?;

    Ok(Json(row.into()))
}
