use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Allocate a fresh document id, unique within this store
    fn allocate_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    /// Fetch an article by id
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;

    /// Store an article under `article.id`
    async fn store_article(&self, article: &Article) -> Result<()>;
}
