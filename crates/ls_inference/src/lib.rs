use ls_core::{Error, Result};
use std::fmt;

pub mod analysis;
pub mod article;
pub mod models;
pub mod prompts;

pub use analysis::SpanAnalyzer;
pub use article::ArticleGenerator;
pub use models::create_model;

pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash-002";
pub const DEFAULT_PROJECT: &str = "ailangstudy";
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Settings used to build the model collaborator.
#[derive(Clone)]
pub struct InferenceConfig {
    /// Backend kind: `gemini`, `vertex` or `dummy`
    pub model: String,
    pub model_name: String,
    /// Overrides the endpoint base, up to and including `/models`
    pub model_url: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub project: String,
    pub location: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model: "gemini".to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_url: None,
            api_key: None,
            access_token: None,
            project: DEFAULT_PROJECT.to_string(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("model", &self.model)
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_deref().map(|_| "<redacted>"))
            .field("project", &self.project)
            .field("location", &self.location)
            .finish()
    }
}

/// Returns the value unless it is absent or `""`. Whitespace counts as a value.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub(crate) fn missing_fields(fields: &[(&str, bool)]) -> Error {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(name, _)| *name)
        .collect();
    Error::Validation(format!("Missing required fields: {}", missing.join(", ")))
}

pub mod prelude {
    pub use super::{ArticleGenerator, InferenceConfig, SpanAnalyzer};
    pub use super::models::create_model;
    pub use ls_core::{Article, AnalysisResponse, Error, Result};
}

/// Reject a reply that carries no usable text.
pub(crate) fn require_text(reply: String, what: &str) -> Result<String> {
    if reply.trim().is_empty() {
        return Err(Error::UpstreamResponseShape(format!("empty {} reply", what)));
    }
    Ok(reply)
}
