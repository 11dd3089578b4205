use std::fmt;
use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info};
use ls_core::{Article, ArticleStorage, CreateArticleRequest, GenerationConfig, InferenceModel, Result};
use crate::{missing_fields, non_empty, prompts, require_text};

/// Near-deterministic sampling for the one-line topic translation.
pub const TRANSLATION_CONFIG: GenerationConfig = GenerationConfig::new(0.1, 256);
pub const GENERATION_CONFIG: GenerationConfig = GenerationConfig::new(0.9, 2048);

/// Translates a topic, generates a study passage about it and stores the result.
pub struct ArticleGenerator {
    model: Arc<dyn InferenceModel>,
    storage: Arc<dyn ArticleStorage>,
}

impl fmt::Debug for ArticleGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleGenerator")
            .field("model", &self.model.name())
            .field("storage", &"<dyn ArticleStorage>")
            .finish()
    }
}

impl ArticleGenerator {
    pub fn new(model: Arc<dyn InferenceModel>, storage: Arc<dyn ArticleStorage>) -> Self {
        Self { model, storage }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn translate_topic(&self, topic: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let prompt = prompts::translation_prompt(topic, source_lang, target_lang);
        let reply = self.model.generate(&prompt, &TRANSLATION_CONFIG).await?;
        let translated = require_text(reply, "topic translation")?.trim().to_string();
        info!(topic, translated_topic = %translated, "topic translated");
        Ok(translated)
    }

    pub async fn create_article(&self, request: &CreateArticleRequest) -> Result<Article> {
        let topic = non_empty(&request.topic);
        let source_lang = non_empty(&request.source_lang);
        let target_lang = non_empty(&request.target_lang);
        let uid = non_empty(&request.uid);

        let (Some(topic), Some(source_lang), Some(target_lang), Some(uid)) =
            (topic, source_lang, target_lang, uid)
        else {
            return Err(missing_fields(&[
                ("topic", topic.is_none()),
                ("sourceLang", source_lang.is_none()),
                ("targetLang", target_lang.is_none()),
                ("uid", uid.is_none()),
            ]));
        };

        info!(topic, source_lang, target_lang, uid, "creating article");
        let translated_topic = self.translate_topic(topic, source_lang, target_lang).await?;

        let prompt = prompts::article_prompt(&translated_topic, target_lang);
        let reply = self.model.generate(&prompt, &GENERATION_CONFIG).await?;
        let text = require_text(reply, "article generation")?.trim().to_string();
        debug!(chars = text.chars().count(), "generated article text");

        let article = Article {
            id: self.storage.allocate_id(),
            uid: uid.to_string(),
            topic: topic.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            text,
            translation: None,
            created_at: Utc::now(),
        };

        info!(article_id = %article.id, "saving article");
        self.storage.store_article(&article).await?;
        info!(article_id = %article.id, "article saved");

        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScriptedModel, ScriptedReply};
    use ls_storage::InMemoryStorage;

    #[tokio::test]
    async fn test_translate_topic_trims_reply() {
        let model = Arc::new(ScriptedModel::with_texts(["  旅行\n"]));
        let generator = ArticleGenerator::new(model.clone(), Arc::new(InMemoryStorage::new()));

        let translated = generator.translate_topic("travel", "en", "ja").await.unwrap();
        assert_eq!(translated, "旅行");

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, TRANSLATION_CONFIG);
        assert!(calls[0].0.contains("from en to ja"));
    }

    #[tokio::test]
    async fn test_blank_translation_is_shape_error() {
        let model = Arc::new(ScriptedModel::with_texts(["   "]));
        let generator = ArticleGenerator::new(model, Arc::new(InMemoryStorage::new()));

        let err = generator.translate_topic("travel", "en", "ja").await.unwrap_err();
        assert_eq!(err.kind(), "upstream_response_shape");
    }

    #[tokio::test]
    async fn test_generation_uses_translated_topic() {
        let model = Arc::new(ScriptedModel::new([
            ScriptedReply::Text("旅行".to_string()),
            ScriptedReply::Text("本文".to_string()),
        ]));
        let storage = Arc::new(InMemoryStorage::new());
        let generator = ArticleGenerator::new(model.clone(), storage.clone());

        let request = CreateArticleRequest {
            topic: Some("travel".to_string()),
            source_lang: Some("en".to_string()),
            target_lang: Some("ja".to_string()),
            uid: Some("u1".to_string()),
        };
        let article = generator.create_article(&request).await.unwrap();
        assert_eq!(article.topic, "travel");
        assert_eq!(article.text, "本文");
        assert_eq!(article.translation, None);

        let calls = model.calls();
        assert!(calls[1].0.contains("about \"旅行\" in ja"));
        assert_eq!(calls[1].1, GENERATION_CONFIG);
        assert_eq!(storage.len().await, 1);
    }
}
