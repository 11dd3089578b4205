use std::fmt;
use ls_core::{GenerationConfig, Result};
use crate::prompts::{ANALYSIS_FORMAT_MARKER, TRANSLATION_PREAMBLE};
use super::InferenceModel;

const DUMMY_PASSAGE: &str = "This is an offline study passage. \
It uses short sentences and common words. \
Read it slowly and pick any phrase you want explained.";

const DUMMY_ANALYSIS: &str = r#"```json
{
  "vocabulary": [
    {
      "word": "passage",
      "meaning": "a short piece of writing",
      "example": "Read the passage aloud.",
      "exampleTranslation": "Read the passage aloud."
    }
  ],
  "grammar": [],
  "contextAnalysis": "Generated offline; no model was called.",
  "notes": [],
  "exercises": []
}
```"#;

/// Offline model for local runs. Replies are canned, keyed on the prompt shape.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str, _config: &GenerationConfig) -> Result<String> {
        if prompt.starts_with(TRANSLATION_PREAMBLE) {
            // The topic is the last quoted string
            let topic = prompt.rsplit('"').nth(1).unwrap_or_default();
            return Ok(topic.to_string());
        }
        if prompt.contains(ANALYSIS_FORMAT_MARKER) {
            return Ok(DUMMY_ANALYSIS.to_string());
        }
        Ok(DUMMY_PASSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{parse_analysis, strip_code_fence};
    use crate::prompts;
    use ls_core::SpanContext;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let config = GenerationConfig::new(0.5, 64);

        let topic = model
            .generate(&prompts::translation_prompt("travel", "en", "ja"), &config)
            .await
            .unwrap();
        assert_eq!(topic, "travel");

        let passage = model
            .generate(&prompts::article_prompt("travel", "ja"), &config)
            .await
            .unwrap();
        assert_eq!(passage, DUMMY_PASSAGE);

        let reply = model
            .generate(&prompts::analysis_prompt("en", "ja", &SpanContext::default()), &config)
            .await
            .unwrap();
        let analysis = parse_analysis(strip_code_fence(&reply)).unwrap();
        assert_eq!(analysis.vocabulary[0].word, "passage");
    }
}
