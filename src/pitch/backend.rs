//! Generation backends.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::GenerationConfig;
use crate::utils::http::HttpClient;

/// Why a generation attempt failed
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("backend returned an empty completion")]
    EmptyCompletion,
}

impl BackendError {
    /// The backend refused the requested model (unknown, deprecated or unsupported)
    pub fn is_model_rejection(&self) -> bool {
        matches!(self, BackendError::Status { status: 400 | 404, .. })
    }

    /// Credential missing or refused
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, BackendError::MissingCredential)
            || matches!(self, BackendError::Status { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

/// A text-generation service addressed by model identifier
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a completion for `prompt` with `model`
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError>;
}

// Wire types for the generateContent endpoint

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
pub(crate) fn parse_completion(body: &str) -> Result<String, BackendError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| BackendError::MalformedResponse("missing candidates[0].content.parts[0].text".to_string()))?;

    if text.trim().is_empty() {
        return Err(BackendError::EmptyCompletion);
    }

    Ok(text.trim().to_string())
}

/// Gemini `generateContent` client
pub struct GeminiBackend {
    http: HttpClient,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(config: &GenerationConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(
            Some(format!("leadsmith/{}", env!("CARGO_PKG_VERSION"))),
            Duration::from_secs(config.timeout_secs),
            5,
        )?;

        Ok(Self {
            http,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let api_key = self.api_key.as_deref().ok_or(BackendError::MissingCredential)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|_| BackendError::MissingCredential)?,
        );

        debug!(model = %model, "Gemini generateContent request");

        let response = self
            .http
            .post_json(&self.endpoint(model), headers, &GenerateRequest::new(prompt))
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::fetcher::test_server;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::new("hello")).unwrap();
        assert_eq!(body, serde_json::json!({ "contents": [{ "parts": [{ "text": "hello" }] }] }));
    }

    #[test]
    fn test_parse_completion_success() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  Hi there  "}],"role":"model"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Hi there");
    }

    #[test]
    fn test_parse_completion_wrong_shape() {
        assert!(matches!(parse_completion("{}"), Err(BackendError::MalformedResponse(_))));
        assert!(matches!(parse_completion("not json"), Err(BackendError::MalformedResponse(_))));
        assert!(matches!(
            parse_completion(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
            Err(BackendError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_completion_blank_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#;
        assert!(matches!(parse_completion(body), Err(BackendError::EmptyCompletion)));
    }

    #[test]
    fn test_error_classification() {
        assert!(BackendError::Status { status: 404, body: String::new() }.is_model_rejection());
        assert!(!BackendError::Status { status: 500, body: String::new() }.is_model_rejection());
        assert!(BackendError::MissingCredential.is_auth_failure());
        assert!(BackendError::Status { status: 403, body: String::new() }.is_auth_failure());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let backend = GeminiBackend::new(&GenerationConfig::default()).unwrap();
        let result = backend.generate("gemini-1.5-flash", "prompt").await;
        assert!(matches!(result, Err(BackendError::MissingCredential)));
    }

    #[test]
    fn test_endpoint() {
        let config = GenerationConfig {
            base_url: "https://example.test/v1beta/".to_string(),
            ..GenerationConfig::default()
        };
        let backend = GeminiBackend::new(&config).unwrap();
        assert_eq!(
            backend.endpoint("gemini-pro"),
            "https://example.test/v1beta/models/gemini-pro:generateContent"
        );
    }

    fn backend_at(addr: std::net::SocketAddr) -> GeminiBackend {
        let config = GenerationConfig {
            api_key: Some("test-key".to_string()),
            base_url: format!("http://{}/v1beta", addr),
            ..GenerationConfig::default()
        };
        GeminiBackend::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_generate_reads_first_candidate() {
        let addr = test_server::serve(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"Dear Globex team"}]}}]}"#,
        )
        .await;

        let text = backend_at(addr).generate("gemini-1.5-flash", "write").await.unwrap();
        assert_eq!(text, "Dear Globex team");
    }

    #[tokio::test]
    async fn test_generate_unknown_model_is_rejection() {
        let addr = test_server::serve("404 Not Found", r#"{"error":{"code":404}}"#).await;

        let err = backend_at(addr).generate("gemini-0", "write").await.unwrap_err();
        assert!(err.is_model_rejection(), "{}", err);
    }
}
