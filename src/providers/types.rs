use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the Gemini API, built once at startup
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Model identifier, e.g. `gemini-2.5-flash`
    pub model: String,
    /// API root without trailing slash
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// Keeps the key out of logs
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Web reference inside a grounding chunk
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawWebReference {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Grounding chunk as reported by the provider; only web chunks are used
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawCitation {
    #[serde(default)]
    pub web: Option<RawWebReference>,
}

/// Free-form model answer plus the sources it was grounded on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: String,
    pub citations: Vec<RawCitation>,
}
