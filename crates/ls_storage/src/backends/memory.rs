use async_trait::async_trait;
use ls_core::{Article, ArticleStorage, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local document store. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    articles: Arc<RwLock<HashMap<String, Article>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}

#[async_trait]
impl ArticleStorage for InMemoryStorage {
    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.get(id).cloned())
    }

    async fn store_article(&self, article: &Article) -> Result<()> {
        let mut articles = self.articles.write().await;
        if articles.contains_key(&article.id) {
            return Err(ls_core::Error::Storage(format!(
                "Article {} already exists",
                article.id
            )));
        }
        articles.insert(article.id.clone(), article.clone());
        Ok(())
    }
}
