use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use ls_core::{Error, GenerationConfig, Result};
use super::InferenceModel;

const GENERATIVE_LANGUAGE_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of `candidates[0].content.parts[0]`.
    fn into_text(self) -> Result<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                Error::UpstreamResponseShape("generateContent reply has no candidate text".to_string())
            })
    }
}

#[derive(Clone)]
pub enum GeminiAuth {
    /// Generative Language API key, sent as the `key` query parameter
    ApiKey(String),
    /// OAuth access token for the Vertex AI endpoint
    Bearer(String),
}

pub struct GeminiModel {
    client: Arc<Client>,
    auth: GeminiAuth,
    endpoint: Url,
    model_name: String,
}

impl GeminiModel {
    pub fn with_api_key(api_key: String, model_name: &str, base_url: Option<&str>) -> Result<Self> {
        let base = base_url.unwrap_or(GENERATIVE_LANGUAGE_BASE);
        Self::new(GeminiAuth::ApiKey(api_key), base, model_name)
    }

    pub fn vertex(
        access_token: String,
        project: &str,
        location: &str,
        model_name: &str,
        base_url: Option<&str>,
    ) -> Result<Self> {
        let base = match base_url {
            Some(base) => base.to_string(),
            None => format!(
                "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models"
            ),
        };
        Self::new(GeminiAuth::Bearer(access_token), &base, model_name)
    }

    pub fn new(auth: GeminiAuth, base_url: &str, model_name: &str) -> Result<Self> {
        let endpoint = endpoint_url(base_url, model_name)?;
        Ok(Self {
            client: Arc::new(Client::new()),
            auth,
            endpoint,
            model_name: model_name.to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

fn endpoint_url(base_url: &str, model_name: &str) -> Result<Url> {
    let raw = format!("{}/{}:generateContent", base_url.trim_end_matches('/'), model_name);
    Url::parse(&raw).map_err(|e| Error::Inference(format!("Invalid model endpoint {}: {}", raw, e)))
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = match self.auth {
            GeminiAuth::ApiKey(_) => "api-key <redacted>",
            GeminiAuth::Bearer(_) => "bearer <redacted>",
        };
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("auth", &auth)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[async_trait]
impl InferenceModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: config,
        };

        let builder = self.client.post(self.endpoint.clone());
        let builder = match &self.auth {
            GeminiAuth::ApiKey(key) => builder.query(&[("key", key)]),
            GeminiAuth::Bearer(token) => builder.bearer_auth(token),
        };

        debug!(
            model = %self.model_name,
            prompt_chars = prompt.chars().count(),
            temperature = config.temperature,
            max_output_tokens = config.max_output_tokens,
            "calling generateContent"
        );
        let response = builder.json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!("generateContent returned {}: {}", status, body)));
        }

        response.json::<GenerateContentResponse>().await?.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<String> {
        serde_json::from_value::<GenerateContentResponse>(value).unwrap().into_text()
    }

    #[test]
    fn test_request_wire_format() {
        let config = GenerationConfig::new(0.1, 256);
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: &config,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 256);
        assert!(value["generationConfig"]["temperature"].as_f64().unwrap() < 0.2);
    }

    #[test]
    fn test_reads_first_candidate_text() {
        let text = parse(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "旅行" }, { "text": "ignored" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(text, "旅行");
    }

    #[test]
    fn test_missing_candidate_text_is_shape_error() {
        for reply in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }),
        ] {
            let err = parse(reply).unwrap_err();
            assert_eq!(err.kind(), "upstream_response_shape");
        }
    }

    #[test]
    fn test_endpoints() {
        let model = GeminiModel::with_api_key("k".to_string(), "gemini-1.5-flash-002", None).unwrap();
        assert_eq!(
            model.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-002:generateContent"
        );

        let model = GeminiModel::vertex(
            "t".to_string(),
            "ailangstudy",
            "us-central1",
            "gemini-1.5-flash-002",
            None,
        )
        .unwrap();
        assert_eq!(
            model.endpoint().as_str(),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/ailangstudy/locations/us-central1/publishers/google/models/gemini-1.5-flash-002:generateContent"
        );

        assert!(GeminiModel::with_api_key("k".to_string(), "m", Some("not a url")).is_err());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let model = GeminiModel::with_api_key("secret".to_string(), "m", None).unwrap();
        let debug = format!("{:?}", model);
        assert!(!debug.contains("secret"));
    }
}
