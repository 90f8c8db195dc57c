//! External identity provider client
//!
//! Exchanges the one-time code the mobile app received during the OAuth
//! redirect for the provider's session data. The provider owns the whole
//! flow; we only probe its session-data endpoint with the code.

use serde::Deserialize;
use std::time::Duration;
use wayfare_common::{
    config::IdentityConfig,
    errors::{AppError, Result},
};

/// Session data returned by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSession {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    /// The provider's own session token; unused once we issue ours
    #[serde(default)]
    pub session_token: Option<String>,
}

#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    config: IdentityConfig,
}

impl IdentityClient {
    pub fn new(config: IdentityConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Exchange a one-time code for the provider's session data
    pub async fn exchange(&self, one_time_code: &str) -> Result<ProviderSession> {
        let response = self
            .client
            .get(&self.config.session_data_url)
            .header("X-Session-ID", one_time_code)
            .send()
            .await
            .map_err(|e| AppError::IdentityExchange {
                message: format!("Request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::IdentityExchange {
                message: format!("Provider error {}: {}", status, body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::IdentityExchange {
                message: format!("Failed to parse provider response: {}", e),
            })
    }
}
