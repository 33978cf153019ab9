//! Gemini REST implementation of [`TextOracle`].

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::OracleConfig;

use super::{OracleError, TextOracle};

/// Calls the Gemini `generateContent` endpoint with a single text part.
#[derive(Debug, Clone)]
pub struct GeminiOracle {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiOracle {
    /// Creates an oracle with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Request`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, config: &OracleConfig) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OracleError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates an oracle reading the API key from the configured variable.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::MissingApiKey`] if the variable is unset or blank.
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| OracleError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(api_key, config)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

impl TextOracle for GeminiOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending oracle request");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "oracle request rejected");
            return Err(status_error(status, &text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Decode(e.to_string()))?;
        extract_text(parsed)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, OracleError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(OracleError::EmptyResponse)
}

fn status_error(status: StatusCode, body: &str) -> OracleError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let message = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(status_text) if !status_text.is_empty() => {
                    format!("{status_text}: {message}")
                }
                _ => message,
            })
        })
        .unwrap_or_else(|| body.trim().to_string());

    OracleError::Status {
        status: status.as_u16(),
        message,
    }
}
