//! Prompt templates sent to the model.

use ls_core::SpanContext;

pub const TRANSLATION_PREAMBLE: &str = "Translate the following topic";
pub const ANALYSIS_FORMAT_MARKER: &str = "Format the response in JSON";

pub const SELECTION_OPEN: &str = ">>>";
pub const SELECTION_CLOSE: &str = "<<<";

pub fn translation_prompt(topic: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "{TRANSLATION_PREAMBLE} from {source_lang} to {target_lang}. \
Return ONLY the translated text without any explanation or additional formatting:\n\n\"{topic}\""
    )
}

pub fn article_prompt(translated_topic: &str, target_lang: &str) -> String {
    format!(
        "You are an experienced language teacher creating a language learning article about \"{translated_topic}\" in {target_lang}.

Write a passage of approximately 10000 characters that serves as an effective learning material. The text should:
- Use grammar structures appropriate for beginner to intermediate learners
- Include essential vocabulary and common expressions
- Incorporate cultural elements and practical usage scenarios
- Be engaging and relatable to language learners
- Flow naturally and maintain coherence
- Include key learning points and target expressions

Return ONLY the text content, without any additional formatting or explanation."
    )
}

/// Inline the selection between the sentinel markers, e.g. `ABC>>>DEF<<<GHIJ`.
pub fn mark_selection(context: &SpanContext) -> String {
    format!(
        "{}{SELECTION_OPEN}{}{SELECTION_CLOSE}{}",
        context.before, context.selected, context.after
    )
}

pub fn analysis_prompt(source_lang: &str, target_lang: &str, context: &SpanContext) -> String {
    let marked = mark_selection(context);
    format!(
        "As an experienced language teacher, analyze the following text in {target_lang}, focusing especially on the part between {SELECTION_OPEN} and {SELECTION_CLOSE}:

{marked}

Provide a detailed explanation in {source_lang} about:
1. Key vocabulary words and their meanings from the selected text
2. Grammar points and structures used in the selected text
3. Usage notes and common patterns
4. How this part connects with the surrounding context
5. Practice exercises and application examples for learners

If the text contains German words or references to German language, please provide detailed explanations about their meanings and origins.

{ANALYSIS_FORMAT_MARKER} with the following structure:
{{
  \"vocabulary\": [
    {{
      \"word\": \"word from selected text\",
      \"reading\": \"reading if applicable\",
      \"meaning\": \"meaning in {source_lang}\",
      \"example\": \"example sentence\",
      \"exampleTranslation\": \"translation of example\",
      \"germanOrigin\": \"explanation of German origin if applicable\"
    }}
  ],
  \"grammar\": [
    {{
      \"pattern\": \"grammar pattern\",
      \"explanation\": \"detailed explanation\",
      \"example\": \"example from the text or similar\",
      \"exampleTranslation\": \"translation of example\"
    }}
  ],
  \"contextAnalysis\": \"explanation of how this part fits into the broader context\",
  \"notes\": [\"usage notes\", \"cultural points\", \"German language connections\", \"etc\"],
  \"exercises\": [
    {{
      \"type\": \"exercise type\",
      \"question\": \"exercise question\",
      \"options\": [\"option 1\", \"option 2\", \"option 3\"],
      \"answer\": \"correct answer\",
      \"explanation\": \"explanation of the answer\"
    }}
  ]
}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_prompt_quotes_topic() {
        let prompt = translation_prompt("travel", "en", "ja");
        assert!(prompt.starts_with(TRANSLATION_PREAMBLE));
        assert!(prompt.contains("from en to ja"));
        assert!(prompt.ends_with("\"travel\""));
    }

    #[test]
    fn test_article_prompt_mentions_topic_and_language() {
        let prompt = article_prompt("旅行", "ja");
        assert!(prompt.contains("about \"旅行\" in ja"));
        assert!(prompt.contains("approximately 10000 characters"));
    }

    #[test]
    fn test_analysis_prompt_marks_selection() {
        let context = SpanContext {
            before: "ABC".to_string(),
            selected: "DEF".to_string(),
            after: "GHIJ".to_string(),
        };
        let prompt = analysis_prompt("en", "de", &context);
        assert!(prompt.contains("ABC>>>DEF<<<GHIJ"));
        assert!(prompt.contains("analyze the following text in de"));
        assert!(prompt.contains("detailed explanation in en"));
        assert!(prompt.contains("German words"));
        assert!(prompt.contains("\"contextAnalysis\""));
        assert!(prompt.contains(ANALYSIS_FORMAT_MARKER));
    }
}
