//! Visitor analytics and public holiday handlers
//!
//! Both collections are pre-aggregated by the import process; these
//! endpoints are passthrough reads with dimension filters.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::AppState;
use wayfare_common::{
    db::Repository,
    errors::Result,
    models::{PublicHoliday, VisitorAnalytics},
};

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub country: Option<String>,
    pub visitor_type: Option<String>,
}

/// List visitor analytics records
pub async fn list_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<VisitorAnalytics>>> {
    let repo = Repository::new(state.db.clone());
    let rows = repo
        .list_analytics(
            query.year,
            query.month,
            query.country.as_deref(),
            query.visitor_type.as_deref(),
        )
        .await?;

    Ok(Json(rows.into_iter().map(VisitorAnalytics::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct HolidaysQuery {
    pub year: Option<i32>,
}

/// List public holidays, optionally for one calendar year
pub async fn list_holidays(
    State(state): State<AppState>,
    Query(query): Query<HolidaysQuery>,
) -> Result<Json<Vec<PublicHoliday>>> {
    let repo = Repository::new(state.db.clone());
    let rows = repo.list_holidays(query.year).await?;

    Ok(Json(rows.into_iter().map(PublicHoliday::from).collect()))
}
