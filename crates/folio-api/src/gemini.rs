// Gemini generateContent client - single request, single reply, no streaming
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeminiError>;

/// One prior message of a conversation, `role` is `"user"` or `"model"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiTurn {
    pub role: String,
    pub text: String,
}

impl GeminiTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            text: text.into(),
        }
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f64,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
            temperature: 0.7,
        })
    }

    /// Point at a proxy or a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Send `history` followed by `message` and return the reply text.
    ///
    /// A reply without candidates or text parts comes back as an empty string.
    pub async fn generate(
        &self,
        system_instruction: &str,
        history: &[GeminiTurn],
        message: &str,
    ) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.clone()),
                parts: vec![Part {
                    text: Some(turn.text.clone()),
                }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(message.to_string()),
            }],
        });

        let body = GenerateRequest {
            contents,
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(system_instruction.to_string()),
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        debug!(model = %self.model, turns = history.len(), "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, text);
            return Err(GeminiError::RequestFailed(format!(
                "Status {}: {}",
                status, text
            )));
        }

        let text = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        Ok(parsed.text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
