//! Data access layer
//!
//! Typed access to the Wayfare API. Reads never fail from the caller's point
//! of view: any transport, status, or decode problem degrades to an empty
//! collection, `None`, or `false`, with a warning in the log. Screens render
//! their empty state instead of crashing in the field with no connectivity.
//!
//! Itinerary generation is the exception. "No plan" and "empty plan" mean
//! different things to the screen behind it, so that call returns a `Result`.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use wayfare_common::{
    config::ClientConfig,
    models::{
        Attraction, Category, CategoryFilter, Event, Favorite, FavoriteCreate, ItineraryRequest,
    },
};

use crate::session::{AuthSnapshot, ClientError};

/// Server-side cap mirrored here so callers never ask for more
pub const MAX_LIMIT: u32 = 1000;

const DEFAULT_ATTRACTION_LIMIT: u32 = 1000;
const DEFAULT_EVENT_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    auth: watch::Receiver<Option<AuthSnapshot>>,
}

impl ApiClient {
    /// The auth receiver comes from [`crate::SessionStore::subscribe`]; the
    /// client picks up token changes without being told.
    pub fn new(config: &ClientConfig, auth: watch::Receiver<Option<AuthSnapshot>>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            client,
            auth,
        }
    }

    fn bearer(&self) -> Option<String> {
        self.auth.borrow().as_ref().map(|s| s.token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let mut request = self.client.get(self.url(path)).query(query);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                code: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// List attractions, optionally narrowed by category and location.
    /// Empty on any failure.
    pub async fn list_attractions(
        &self,
        filter: CategoryFilter,
        location: Option<&str>,
        limit: Option<u32>,
    ) -> Vec<Attraction> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = filter.query_value() {
            query.push(("category", category.to_string()));
        }
        if let Some(location) = location {
            query.push(("location", location.to_string()));
        }
        let limit = limit.unwrap_or(DEFAULT_ATTRACTION_LIMIT).min(MAX_LIMIT);
        query.push(("limit", limit.to_string()));

        match self.get_json("/api/attractions", &query).await {
            Ok(attractions) => attractions,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list attractions");
                Vec::new()
            }
        }
    }

    /// Fetch one attraction. `None` covers both "not found" and any failure.
    pub async fn get_attraction(&self, id: &str) -> Option<Attraction> {
        match self.get_json(&format!("/api/attractions/{}", id), &[]).await {
            Ok(attraction) => Some(attraction),
            Err(e) => {
                tracing::warn!(error = %e, id, "Failed to fetch attraction");
                None
            }
        }
    }

    /// List events, optionally narrowed by category and a start-date window.
    /// Empty on any failure.
    pub async fn list_events(
        &self,
        category: Option<Category>,
        start_date: Option<chrono::DateTime<chrono::Utc>>,
        end_date: Option<chrono::DateTime<chrono::Utc>>,
        limit: Option<u32>,
    ) -> Vec<Event> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = category {
            query.push(("category", category.as_str().to_string()));
        }
        if let Some(start) = start_date {
            query.push(("start_date", start.to_rfc3339()));
        }
        if let Some(end) = end_date {
            query.push(("end_date", end.to_rfc3339()));
        }
        let limit = limit.unwrap_or(DEFAULT_EVENT_LIMIT).min(MAX_LIMIT);
        query.push(("limit", limit.to_string()));

        match self.get_json("/api/events", &query).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list events");
                Vec::new()
            }
        }
    }

    pub async fn get_event(&self, id: &str) -> Option<Event> {
        match self.get_json(&format!("/api/events/{}", id), &[]).await {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, id, "Failed to fetch event");
                None
            }
        }
    }

    /// Mark an attraction as a favorite. `None` on any failure; adding an
    /// existing favorite returns the existing row.
    pub async fn add_favorite(&self, user_id: &str, attraction_id: &str) -> Option<Favorite> {
        let body = FavoriteCreate {
            user_id: user_id.to_string(),
            attraction_id: attraction_id.to_string(),
        };

        let result = async {
            let mut request = self.client.post(self.url("/api/favorites")).json(&body);
            if let Some(token) = self.bearer() {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(ClientError::Status {
                    code: response.status().as_u16(),
                });
            }

            Ok::<Favorite, ClientError>(response.json().await?)
        }
        .await;

        match result {
            Ok(favorite) => Some(favorite),
            Err(e) => {
                tracing::warn!(error = %e, user_id, attraction_id, "Failed to add favorite");
                None
            }
        }
    }

    /// The user's favorite attractions, resolved server-side. Empty on any
    /// failure.
    pub async fn list_favorites(&self, user_id: &str) -> Vec<Attraction> {
        match self.get_json(&format!("/api/favorites/{}", user_id), &[]).await {
            Ok(attractions) => attractions,
            Err(e) => {
                tracing::warn!(error = %e, user_id, "Failed to list favorites");
                Vec::new()
            }
        }
    }

    /// Remove a favorite. `false` means the removal did not happen, whether
    /// the row was absent or the call failed.
    pub async fn remove_favorite(&self, user_id: &str, attraction_id: &str) -> bool {
        let result = async {
            let mut request = self
                .client
                .delete(self.url(&format!("/api/favorites/{}/{}", user_id, attraction_id)));
            if let Some(token) = self.bearer() {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(ClientError::Status {
                    code: response.status().as_u16(),
                });
            }

            Ok::<(), ClientError>(())
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, user_id, attraction_id, "Failed to remove favorite");
                false
            }
        }
    }

    /// Generate an itinerary. Failures propagate so the caller can show an
    /// error state instead of an empty plan.
    pub async fn generate_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<String, ClientError> {
        #[derive(Serialize, Deserialize)]
        struct GeneratedItinerary {
            itinerary: String,
        }

        let mut http_request = self
            .client
            .post(self.url("/api/itinerary/generate"))
            .json(request);
        if let Some(token) = self.bearer() {
            http_request = http_request.bearer_auth(token);
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(if status.as_u16() == 401 {
                ClientError::Unauthenticated
            } else {
                ClientError::Status {
                    code: status.as_u16(),
                }
            });
        }

        let generated: GeneratedItinerary = response.json().await?;
        Ok(generated.itinerary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_common::models::Budget;

    // Nothing listens on this port; every call must degrade, never panic
    fn unreachable_client() -> ApiClient {
        let config = ClientConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
        };
        let (_tx, rx) = watch::channel(None);
        ApiClient::new(&config, rx)
    }

    #[tokio::test]
    async fn test_unreachable_reads_degrade_to_empty() {
        let client = unreachable_client();

        assert!(client
            .list_attractions(CategoryFilter::All, None, None)
            .await
            .is_empty());
        assert!(client.get_attraction("a-1").await.is_none());
        assert!(client.list_events(None, None, None, None).await.is_empty());
        assert!(client.get_event("e-1").await.is_none());
        assert!(client.list_favorites("user-1").await.is_empty());
        assert!(client.add_favorite("user-1", "a-1").await.is_none());
        assert!(!client.remove_favorite("user-1", "a-1").await);
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let client = unreachable_client();

        let request = ItineraryRequest {
            interests: vec![Category::Nature],
            duration: 3,
            budget: Budget::Medium,
            user_id: None,
        };

        let err = client.generate_itinerary(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_all_filter_omits_category_parameter() {
        assert!(CategoryFilter::All.query_value().is_none());
        assert_eq!(
            CategoryFilter::Only(Category::Culture).query_value(),
            Some("Culture")
        );
    }
}
