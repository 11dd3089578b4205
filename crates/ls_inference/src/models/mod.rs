use std::sync::Arc;
use ls_core::Result;
use tracing::info;
use crate::InferenceConfig;

pub mod dummy;
pub mod gemini;
pub mod scripted;

pub use dummy::DummyModel;
pub use gemini::{GeminiAuth, GeminiModel};
pub use scripted::{ScriptedModel, ScriptedReply};
pub use ls_core::InferenceModel;

pub async fn create_model(config: &InferenceConfig) -> Result<Arc<dyn InferenceModel>> {
    let model: Arc<dyn InferenceModel> = match config.model.as_str() {
        "gemini" => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                ls_core::Error::Inference("Gemini API key is required".to_string())
            })?;
            Arc::new(GeminiModel::with_api_key(
                api_key,
                &config.model_name,
                config.model_url.as_deref(),
            )?)
        }
        "vertex" => {
            let token = config.access_token.clone().ok_or_else(|| {
                ls_core::Error::Inference("Vertex AI access token is required".to_string())
            })?;
            Arc::new(GeminiModel::vertex(
                token,
                &config.project,
                &config.location,
                &config.model_name,
                config.model_url.as_deref(),
            )?)
        }
        "dummy" => Arc::new(DummyModel::new()),
        other => {
            return Err(ls_core::Error::Inference(format!(
                "Unknown model: {} (available: gemini, vertex, dummy)",
                other
            )))
        }
    };

    info!(model = model.name(), model_name = %config.model_name, "inference model ready");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_dummy_model() {
        let config = InferenceConfig {
            model: "dummy".to_string(),
            ..Default::default()
        };
        let model = create_model(&config).await.unwrap();
        assert_eq!(model.name(), "Dummy");
    }

    #[tokio::test]
    async fn test_gemini_requires_api_key() {
        let err = create_model(&InferenceConfig::default()).await.err().unwrap();
        assert_eq!(err.to_string(), "Inference error: Gemini API key is required");
    }

    #[tokio::test]
    async fn test_vertex_requires_token() {
        let config = InferenceConfig {
            model: "vertex".to_string(),
            ..Default::default()
        };
        assert!(create_model(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_model() {
        let config = InferenceConfig {
            model: "ollama".to_string(),
            ..Default::default()
        };
        let err = create_model(&config).await.err().unwrap();
        assert!(err.to_string().contains("ollama"));
    }
}
