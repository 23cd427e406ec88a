//! Gemini `generateContent` client behind the [`CoachClient`] trait so
//! handlers and tests can swap in fakes.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const TEMPERATURE: f64 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("AI coach is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(String),

    #[error("api error: {0}")]
    Api(String),

    #[error("unexpected response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One turn of a conversation, oldest first.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[async_trait]
pub trait CoachClient: Send + Sync {
    /// Send a conversation and return the model's reply text.
    async fn chat(&self, turns: &[ChatTurn]) -> Result<String, CoachError>;
}

// --- wire types ---

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// --- implementations ---

pub struct GeminiCoach {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiCoach {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

#[async_trait]
impl CoachClient for GeminiCoach {
    async fn chat(&self, turns: &[ChatTurn]) -> Result<String, CoachError> {
        let request = GenerateRequest {
            contents: turns
                .iter()
                .map(|turn| Content {
                    role: turn.role.as_str(),
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| CoachError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoachError::Request(e.to_string()))?;

        if !status.is_success() {
            if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(CoachError::Api(parsed.error.message));
            }
            return Err(CoachError::Api(format!("HTTP {status}: {body}")));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| CoachError::Parse(e.to_string()))?;

        debug!(candidates = parsed.candidates.len(), "gemini reply received");

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| CoachError::Parse("no text candidate in response".into()))
    }
}

/// Installed when no API key is configured; every call answers
/// [`CoachError::NotConfigured`].
pub struct DisabledCoach;

#[async_trait]
impl CoachClient for DisabledCoach {
    async fn chat(&self, _turns: &[ChatTurn]) -> Result<String, CoachError> {
        Err(CoachError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(text: &str) -> ChatTurn {
        ChatTurn {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    #[tokio::test]
    async fn chat_extracts_the_first_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash:generateContent?key=test-key",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Aim for 2L of water a day."}]}}]}"#,
            )
            .create_async()
            .await;

        let coach = GeminiCoach::new(
            "test-key".into(),
            "gemini-2.0-flash".into(),
            server.url(),
        );
        let reply = coach.chat(&[turn("How much water should I drink?")]).await;
        assert_eq!(reply.unwrap(), "Aim for 2L of water a day.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_surfaces_api_error_messages() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash:generateContent?key=bad-key",
            )
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#)
            .create_async()
            .await;

        let coach = GeminiCoach::new("bad-key".into(), "gemini-2.0-flash".into(), server.url());
        let err = coach.chat(&[turn("hi")]).await.unwrap_err();
        match err {
            CoachError::Api(message) => assert_eq!(message, "API key not valid"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn chat_rejects_a_reply_with_no_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash:generateContent?key=test-key",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let coach = GeminiCoach::new("test-key".into(), "gemini-2.0-flash".into(), server.url());
        let err = coach.chat(&[turn("hi")]).await.unwrap_err();
        assert!(matches!(err, CoachError::Parse(_)));
    }

    #[tokio::test]
    async fn disabled_coach_always_answers_not_configured() {
        let err = DisabledCoach.chat(&[turn("hi")]).await.unwrap_err();
        assert!(matches!(err, CoachError::NotConfigured));
    }
}
