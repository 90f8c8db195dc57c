//! Itinerary generation via a chat-completions service

use serde::{Deserialize, Serialize};
use std::time::Duration;
use wayfare_common::{
    config::GeneratorConfig,
    errors::{AppError, Result},
    models::{Budget, Category},
};

#[derive(Clone)]
pub struct ItineraryGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl ItineraryGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Generate an itinerary for the given interests, trip length and budget
    pub async fn generate(
        &self,
        interests: &[Category],
        duration: u32,
        budget: Budget,
    ) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration {
                message: "Generation service API key is not configured".to_string(),
            })?;

        let prompt = build_prompt(interests, duration, budget);

        #[derive(Serialize)]
        struct ChatMessage {
            role: &'static str,
            content: String,
        }

        #[derive(Serialize)]
        struct ChatRequest {
            model: String,
            messages: Vec<ChatMessage>,
            max_tokens: usize,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct ChatMessageResponse {
            content: String,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessageResponse,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a knowledgeable local travel planner. \
                              Produce a practical day-by-day itinerary."
                        .to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: 1500,
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Generation {
                message: format!("Request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation {
                message: format!("Generation service error {}: {}", status, body),
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| AppError::Generation {
            message: format!("Failed to parse generation response: {}", e),
        })?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Generation {
                message: "Empty response from generation service".to_string(),
            })
    }
}

fn build_prompt(interests: &[Category], duration: u32, budget: Budget) -> String {
    let interests = interests
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Plan a {}-day trip for a visitor with a {} budget.\n\
         Interests: {}.\n\
         Give each day a short heading, list morning, afternoon and evening \
         activities, and mention local food options where relevant.",
        duration,
        budget.as_str(),
        interests
    )
}
