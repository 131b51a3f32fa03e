use std::time::Duration;

use log::{error, info};
use reqwest::Client;

use crate::error::GatewayError;
use crate::models::{ApiMessage, ChatCompletionRequest, ChatCompletionResponse};

/// Fallback endpoint when the caller does not provide one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9090/v1";

/// Model name placeholder; local endpoints generally ignore it.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI-style endpoints expect the auth header even when no key is
/// checked.
const PLACEHOLDER_API_KEY: &str = "sk-no-key-required";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Stateless client for OpenAI-style `/chat/completions` endpoints.
///
/// One call per completion. A timeout or upstream error surfaces to the
/// caller with conversation state untouched.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Client,
    default_base_url: String,
}

impl LlmClient {
    pub fn new() -> Self {
        Self::with_default_base_url(DEFAULT_BASE_URL)
    }

    /// Override the fallback endpoint. Tests point this at a mock server.
    pub fn with_default_base_url(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("gateway http client");
        Self {
            http,
            default_base_url: base_url.into(),
        }
    }

    /// Send one completion request and return the first choice's text.
    ///
    /// A non-blank `base_url` overrides the default endpoint.
    pub async fn complete(
        &self,
        messages: Vec<ApiMessage>,
        base_url: Option<&str>,
    ) -> Result<String, GatewayError> {
        let base = match base_url.map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => self.default_base_url.as_str(),
        };
        let endpoint = format!("{}/chat/completions", base.trim_end_matches('/'));

        let request = ChatCompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages,
        };

        info!(
            "Relaying {} messages to {}",
            request.messages.len(),
            endpoint
        );

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(PLACEHOLDER_API_KEY)
            .json(&request)
            .send()
            .await
            .map_err(|source| {
                error!("Error communicating with LLM at {endpoint}: {source}");
                GatewayError::Transport {
                    endpoint: endpoint.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("LLM endpoint {endpoint} returned {status}: {body}");
            return Err(GatewayError::UpstreamStatus {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|source| {
            error!("Failed to decode completion from {endpoint}: {source}");
            GatewayError::MalformedResponse {
                endpoint: endpoint.clone(),
                reason: source.to_string(),
            }
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::MalformedResponse {
                endpoint,
                reason: "response contained no choices".to_string(),
            })
    }
}

impl Default for LlmClient {
    fn default() -> Self {
        Self::new()
    }
}
