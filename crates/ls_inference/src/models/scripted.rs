use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use ls_core::{Error, GenerationConfig, Result};
use super::InferenceModel;

#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    /// A reply that carried no candidate text
    NoCandidate,
}

/// Test double replaying queued replies in order and recording every call.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<(String, GenerationConfig)>>,
}

impl fmt::Debug for ScriptedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedModel")
            .field("calls", &self.call_count())
            .finish()
    }
}

impl ScriptedModel {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = ScriptedReply>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(|t| ScriptedReply::Text(t.into())))
    }

    pub fn calls(&self) -> Vec<(String, GenerationConfig)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl InferenceModel for ScriptedModel {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((prompt.to_string(), *config));

        let reply = self.replies.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
        match reply {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::NoCandidate) => Err(Error::UpstreamResponseShape(
                "scripted reply has no candidate text".to_string(),
            )),
            None => Err(Error::Inference("no scripted reply left".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let model = ScriptedModel::new([
            ScriptedReply::Text("first".to_string()),
            ScriptedReply::NoCandidate,
        ]);
        let config = GenerationConfig::new(0.1, 8);

        assert_eq!(model.generate("a", &config).await.unwrap(), "first");
        assert_eq!(model.generate("b", &config).await.unwrap_err().kind(), "upstream_response_shape");
        assert_eq!(model.generate("c", &config).await.unwrap_err().kind(), "inference");

        let prompts: Vec<String> = model.calls().into_iter().map(|(p, _)| p).collect();
        assert_eq!(prompts, ["a", "b", "c"]);
    }
}
