//! Gateway error types

use thiserror::Error;

/// Failure talking to the completion endpoint.
///
/// Every variant names the endpoint so operators can tell which upstream
/// misbehaved. The gateway performs no retries; callers decide how to
/// degrade.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}: {body}")]
    UpstreamStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("malformed completion response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

impl GatewayError {
    /// Endpoint the failed request was sent to.
    pub fn endpoint(&self) -> &str {
        match self {
            GatewayError::Transport { endpoint, .. }
            | GatewayError::UpstreamStatus { endpoint, .. }
            | GatewayError::MalformedResponse { endpoint, .. } => endpoint,
        }
    }
}
