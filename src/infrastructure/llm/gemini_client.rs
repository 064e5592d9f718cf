use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnalysisClient, AnalysisError};
use crate::domain::{AnalysisQuery, RawModelReply, SafetyInfo};
use crate::presentation::config::LlmSettings;

use super::compliance_prompt::build_compliance_prompt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const BLOCKING_FINISH_REASONS: [&str; 4] = ["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

/// `generateContent` client for Gemini-style generative-text providers.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Provider payload of a `generateContent` call.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<SafetyRating>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<SafetyRating>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SafetyRating {
    category: String,
    #[serde(default)]
    probability: Option<String>,
    #[serde(default)]
    probability_score: Option<f32>,
    #[serde(default)]
    blocked: bool,
}

impl SafetyRating {
    fn score(&self) -> f32 {
        if let Some(score) = self.probability_score {
            return score;
        }
        match self.probability.as_deref() {
            Some("LOW") => 0.25,
            Some("MEDIUM") => 0.5,
            Some("HIGH") => 0.75,
            _ => 0.0,
        }
    }
}

fn safety_from_ratings(ratings: &[SafetyRating], blocked: bool) -> SafetyInfo {
    SafetyInfo {
        categories: ratings.iter().map(|r| r.category.clone()).collect(),
        blocked,
        scores: ratings.iter().map(SafetyRating::score).collect(),
    }
}

impl GenerateContentResponse {
    /// Reduces the payload to the first candidate's text and safety verdict.
    ///
    /// A blocked candidate may carry no text; that is passed on as an empty
    /// reply. A non-blocked candidate without text is a malformed payload.
    pub fn into_reply(self) -> Result<RawModelReply, AnalysisError> {
        let prompt_block = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone());

        let Some(candidate) = self.candidates.into_iter().next() else {
            return match (prompt_block, self.prompt_feedback) {
                (Some(reason), Some(feedback)) => {
                    tracing::warn!(block_reason = %reason, "Prompt blocked by provider");
                    Ok(RawModelReply {
                        text: String::new(),
                        safety: safety_from_ratings(&feedback.safety_ratings, true),
                    })
                }
                _ => Err(AnalysisError::MalformedPayload(
                    "response contains no candidates".to_string(),
                )),
            };
        };

        let blocked = prompt_block.is_some()
            || candidate.safety_ratings.iter().any(|r| r.blocked)
            || candidate
                .finish_reason
                .as_deref()
                .is_some_and(|reason| BLOCKING_FINISH_REASONS.contains(&reason));

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if texts.is_empty() && !blocked {
            return Err(AnalysisError::MalformedPayload(
                "candidate has no text content".to_string(),
            ));
        }

        Ok(RawModelReply {
            text: texts.concat(),
            safety: safety_from_ratings(&candidate.safety_ratings, blocked),
        })
    }
}

impl GeminiClient {
    /// Client with default generation settings. Every request is bounded by
    /// `timeout`; an expired request surfaces as [`AnalysisError::Transport`].
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
            temperature: 0.2,
            max_output_tokens: 2048,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl AnalysisClient for GeminiClient {
    #[tracing::instrument(
        skip(self, query),
        fields(
            model = %self.model,
            sent_length = query.context.sent_length,
            truncated = query.context.truncated,
        )
    )]
    async fn analyze(&self, query: &AnalysisQuery) -> Result<RawModelReply, AnalysisError> {
        if self.api_key.trim().is_empty() {
            return Err(AnalysisError::MissingCredential);
        }

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_compliance_prompt(query)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedPayload(e.to_string()))?;

        let reply = payload.into_reply()?;

        if reply.safety.blocked {
            tracing::warn!(
                categories = ?reply.safety.categories,
                "Analysis reply blocked by safety filters"
            );
        }
        tracing::info!(reply_chars = reply.text.chars().count(), "Analysis reply received");

        Ok(reply)
    }
}

pub fn create_gemini_client(settings: &LlmSettings) -> Result<GeminiClient, AnalysisError> {
    let client = GeminiClient::new(
        settings.api_key.clone(),
        settings.model.clone(),
        Duration::from_secs(settings.timeout_secs),
    )?
    .with_base_url(&settings.base_url);

    Ok(GeminiClient {
        temperature: settings.temperature,
        max_output_tokens: settings.max_output_tokens,
        ..client
    })
}
