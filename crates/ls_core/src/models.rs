use async_trait::async_trait;
use crate::types::GenerationConfig;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync {
    fn name(&self) -> &str;

    /// Run a single-turn completion and return the text of the first candidate.
    ///
    /// Implementations report a reply without candidate text as
    /// [`crate::Error::UpstreamResponseShape`].
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;
}
