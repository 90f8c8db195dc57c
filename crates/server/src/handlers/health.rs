//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<CollectionCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct CollectionCounts {
    pub attractions: u64,
    pub events: u64,
}

/// API banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: wayfare_common::API_NAME,
        version: wayfare_common::VERSION,
    })
}

/// Check if the API and database are healthy.
///
/// Always answers 200; the body carries the verdict, matching what the
/// mobile client's status screen expects.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let repo = wayfare_common::db::Repository::new(state.db.clone());

    let checks = async {
        repo.ping().await?;
        let attractions = repo.count_attractions().await?;
        let events = repo.count_events().await?;
        Ok::<_, wayfare_common::AppError>(CollectionCounts {
            attractions,
            events,
        })
    };

    match checks.await {
        Ok(collections) => Json(HealthResponse {
            status: "healthy",
            database: Some("connected"),
            collections: Some(collections),
            error: None,
        }),
        Err(e) => Json(HealthResponse {
            status: "unhealthy",
            database: None,
            collections: None,
            error: Some(e.to_string()),
        }),
    }
}
