use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated study article as persisted in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub uid: String,
    pub topic: String,
    pub source_lang: String,
    pub target_lang: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Sampling parameters for a single model call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    pub const fn new(temperature: f32, max_output_tokens: u32) -> Self {
        Self { temperature, max_output_tokens }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub topic: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub uid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTextRequest {
    pub article_id: Option<String>,
    pub selected_text: Option<String>,
    pub start_index: Option<usize>,
    pub end_index: Option<usize>,
}

/// Structured breakdown of a selected span. The model fills this in, so
/// every field may be absent, `null` or of an unexpected scalar type in its
/// reply. `null` leaves take their defaults and scalars are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient::list")]
    pub vocabulary: Vec<VocabularyEntry>,
    #[serde(deserialize_with = "lenient::list")]
    pub grammar: Vec<GrammarEntry>,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub context_analysis: Option<String>,
    #[serde(deserialize_with = "lenient::texts")]
    pub notes: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_list", skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VocabularyEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub word: String,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub meaning: String,
    #[serde(deserialize_with = "lenient::text")]
    pub example: String,
    #[serde(deserialize_with = "lenient::text")]
    pub example_translation: String,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub german_origin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrammarEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub pattern: String,
    #[serde(deserialize_with = "lenient::text")]
    pub explanation: String,
    #[serde(deserialize_with = "lenient::text")]
    pub example: String,
    #[serde(deserialize_with = "lenient::text")]
    pub example_translation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exercise {
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::text")]
    pub question: String,
    #[serde(deserialize_with = "lenient::texts")]
    pub options: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub answer: String,
    #[serde(deserialize_with = "lenient::text")]
    pub explanation: String,
}

/// Field deserializers for model-authored JSON.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn to_text(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        }
    }

    fn to_items(value: Value) -> Vec<Value> {
        match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            single => vec![single],
        }
    }

    /// `null` becomes `""`; numbers, booleans and nested values keep their
    /// JSON text.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Value::deserialize(deserializer).map(to_text)
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Value::deserialize(deserializer).map(|value| match value {
            Value::Null => None,
            other => Some(to_text(other)),
        })
    }

    pub fn texts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(to_items(value).into_iter().map(to_text).collect())
    }

    /// `null` becomes an empty list and a lone object a one-item list.
    /// Items that are not objects are dropped.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(to_items(value)
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    pub fn opt_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(
            to_items(value)
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ))
    }
}

/// Text surrounding a selection, as sent to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanContext {
    pub before: String,
    pub selected: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: AnalysisResult,
    pub context: SpanContext,
}
