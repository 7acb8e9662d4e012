use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the model provider
///
/// These are transport-level problems. A reply that arrives but carries no
/// usable summary is not an error.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to model provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model provider rejected the API key ({status})")]
    Unauthorized { status: StatusCode },
    #[error("model provider quota or rate limit exceeded: {message}")]
    RateLimited { message: String },
    #[error("model provider returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("could not decode model provider response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ProviderError {
    /// Map a non-success HTTP reply to an error variant
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized { status },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited { message },
            _ => Self::Api { status, message },
        }
    }
}
