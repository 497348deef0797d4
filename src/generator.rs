//! Follow-up question generation through the Generative Language
//! `generateContent` endpoint.
//!
//! Generation never fails the run. Every failure is logged and replaced by a
//! fixed fallback text so a comment is always posted.

use crate::config::Settings;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FOLLOW_UP_HEADER: &str = "## AI-Generated Follow-up Questions\n\n";

/// Posted when no API key is configured
pub const MISSING_KEY_RESPONSE: &str =
    "Please provide more details about this issue. What steps have you tried so far?";
/// Posted when the HTTP client cannot be created
pub const CLIENT_ERROR_RESPONSE: &str = "Please provide more details about this issue.";
/// Posted when the generation request fails
pub const REQUEST_ERROR_RESPONSE: &str =
    "Please provide more details about this issue. What steps have you tried so far?";
/// Posted when the response has no candidate text
pub const EMPTY_RESPONSE: &str = "Please provide more details about this issue.";

#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Absent when the candidate was blocked
    #[serde(default)]
    pub content: Content,
    pub finish_reason: Option<String>,
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to create AI client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("API request error: HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Failed to decode generation response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client for a single generation model
pub struct TextGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl TextGenerator {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(GenerationError::Client)?;
        Ok(TextGenerator {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, GenerationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!(%url, model = %self.model, "requesting generation");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(GenerationError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(GenerationError::Decode)
    }
}

/// Turns a generation response into comment text.
///
/// Uses the first part of the first candidate. Responses without candidates,
/// without parts, or whose first part carries no text yield [`EMPTY_RESPONSE`].
pub fn extract_follow_up(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .and_then(|part| part.text.as_deref())
        .map_or_else(
            || EMPTY_RESPONSE.to_string(),
            |text| format!("{FOLLOW_UP_HEADER}{text}"),
        )
}

/// Generates the follow-up comment for `prompt`, falling back to fixed text on any failure.
pub async fn generate_follow_up(settings: &Settings, prompt: &str) -> String {
    let Some(api_key) = settings.ai_api_key.as_deref() else {
        tracing::warn!("GOOGLE_AI_API_KEY not set, using placeholder response");
        return MISSING_KEY_RESPONSE.to_string();
    };

    let generator = match TextGenerator::new(&settings.ai_api_url, api_key, &settings.model) {
        Ok(generator) => generator,
        Err(err) => {
            tracing::warn!(error = %err, "Error creating AI client");
            return CLIENT_ERROR_RESPONSE.to_string();
        }
    };

    match generator.generate(prompt).await {
        Ok(response) => {
            if let Some(reason) = response
                .candidates
                .first()
                .and_then(|candidate| candidate.finish_reason.as_deref())
            {
                tracing::info!(finish_reason = reason, "generation finished");
            }
            let follow_up = extract_follow_up(&response);
            if follow_up == EMPTY_RESPONSE {
                tracing::warn!("Generation response contained no text, using fallback response");
            }
            follow_up
        }
        Err(err) => {
            tracing::warn!(error = %err, "Error generating content");
            REQUEST_ERROR_RESPONSE.to_string()
        }
    }
}
