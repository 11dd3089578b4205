use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use ls_core::{
    AnalysisResponse, AnalysisResult, AnalyzeTextRequest, ArticleStorage, Error, GenerationConfig,
    InferenceModel, Result, SpanContext,
};
use crate::{missing_fields, non_empty, prompts, require_text};

pub const ANALYSIS_CONFIG: GenerationConfig = GenerationConfig::new(0.9, 2048);

/// Characters of surrounding text kept on each side of a selection.
pub const CONTEXT_WINDOW_CHARS: usize = 100;

/// Cut the context around `[start, end)`.
///
/// Offsets count characters, not bytes, and are clamped to the text length.
pub fn context_window(text: &str, selected: &str, start: usize, end: usize) -> SpanContext {
    let len = text.chars().count();
    let start = start.min(len);
    let end = end.min(len);
    let before_start = start.saturating_sub(CONTEXT_WINDOW_CHARS);

    SpanContext {
        before: text.chars().skip(before_start).take(start - before_start).collect(),
        selected: selected.to_string(),
        after: text.chars().skip(end).take(CONTEXT_WINDOW_CHARS).collect(),
    }
}

/// Remove a surrounding ```` ```json ```` / ```` ``` ```` fence, if any.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    body.strip_suffix("```").unwrap_or(body).trim()
}

pub fn parse_analysis(payload: &str) -> Result<AnalysisResult> {
    serde_json::from_str(payload).map_err(Error::ResponseParse)
}

/// Explains a selected span of a stored article.
pub struct SpanAnalyzer {
    model: Arc<dyn InferenceModel>,
    storage: Arc<dyn ArticleStorage>,
}

impl fmt::Debug for SpanAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanAnalyzer")
            .field("model", &self.model.name())
            .field("storage", &"<dyn ArticleStorage>")
            .finish()
    }
}

impl SpanAnalyzer {
    pub fn new(model: Arc<dyn InferenceModel>, storage: Arc<dyn ArticleStorage>) -> Self {
        Self { model, storage }
    }

    pub async fn analyze_text(&self, request: &AnalyzeTextRequest) -> Result<AnalysisResponse> {
        let article_id = non_empty(&request.article_id);
        let selected_text = non_empty(&request.selected_text);

        let (Some(article_id), Some(selected_text), Some(start), Some(end)) =
            (article_id, selected_text, request.start_index, request.end_index)
        else {
            return Err(missing_fields(&[
                ("articleId", article_id.is_none()),
                ("selectedText", selected_text.is_none()),
                ("startIndex", request.start_index.is_none()),
                ("endIndex", request.end_index.is_none()),
            ]));
        };

        info!(article_id, start, end, "analyzing selection");
        let article = self
            .storage
            .get_article(article_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Article {}", article_id)))?;

        let context = context_window(&article.text, selected_text, start, end);
        let prompt = prompts::analysis_prompt(&article.source_lang, &article.target_lang, &context);

        let reply = self.model.generate(&prompt, &ANALYSIS_CONFIG).await?;
        let reply = require_text(reply, "analysis")?;
        debug!(reply = %reply, "raw analysis reply");

        let cleaned = strip_code_fence(&reply);
        let analysis = parse_analysis(cleaned)?;
        info!(
            article_id,
            vocabulary = analysis.vocabulary.len(),
            grammar = analysis.grammar.len(),
            "analysis parsed"
        );

        Ok(AnalysisResponse { analysis, context })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_window_inside_text() {
        let context = context_window("ABCDEFGHIJ", "DEF", 3, 6);
        assert_eq!(context.before, "ABC");
        assert_eq!(context.selected, "DEF");
        assert_eq!(context.after, "GHIJ");
    }

    #[test]
    fn test_context_window_clamps_at_both_ends() {
        let text = "ABCDEFGHIJ";
        let context = context_window(text, "ABCDEFGHIJ", 0, text.len());
        assert_eq!(context.before, "");
        assert_eq!(context.after, "");

        let context = context_window(text, "x", 40, 50);
        assert_eq!(context.before, text);
        assert_eq!(context.after, "");
    }

    #[test]
    fn test_context_window_limits_to_hundred_chars() {
        let text: String = (0..300).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let context = context_window(&text, "sel", 150, 160);
        assert_eq!(context.before, &text[50..150]);
        assert_eq!(context.after, &text[160..260]);
    }

    #[test]
    fn test_context_window_counts_characters() {
        let text = "日本語の文章です";
        let context = context_window(text, "の", 3, 4);
        assert_eq!(context.before, "日本語");
        assert_eq!(context.after, "文章です");
    }

    #[test]
    fn test_strip_code_fence() {
        let payload = "{\"vocabulary\":[]}";
        let fenced = format!("```json\n{}\n```", payload);

        assert_eq!(strip_code_fence(&fenced), payload);
        assert_eq!(strip_code_fence(payload), payload);
        assert_eq!(strip_code_fence("```\n{}\n```\n"), "{}");
        // Idempotent
        assert_eq!(strip_code_fence(strip_code_fence(&fenced)), payload);
        assert_eq!(
            parse_analysis(strip_code_fence(&fenced)).unwrap(),
            parse_analysis(payload).unwrap()
        );
    }

    #[test]
    fn test_parse_failure_is_response_parse() {
        let err = parse_analysis(strip_code_fence("not json")).unwrap_err();
        assert_eq!(err.kind(), "response_parse");
    }

    #[test]
    fn test_parse_accepts_null_and_scalar_fields() {
        let replies = [
            r#"{"vocabulary":[{"word":"x","meaning":null}]}"#,
            r#"{"notes":null}"#,
            r#"{"exercises":[{"type":"choice","answer":1}]}"#,
            r#"{"vocabulary":[{"word":"x","reading":null}]}"#,
        ];
        for reply in replies {
            assert!(parse_analysis(reply).is_ok(), "{}", reply);
        }

        let analysis = parse_analysis(replies[2]).unwrap();
        assert_eq!(analysis.exercises.unwrap()[0].answer, "1");
        assert_eq!(parse_analysis("[]").unwrap_err().kind(), "response_parse");
    }
}
