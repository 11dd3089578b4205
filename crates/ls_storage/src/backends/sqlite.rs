use async_trait::async_trait;
use ls_core::{Article, ArticleStorage, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::PathBuf;
use std::sync::Arc;
use crate::BackendConfig;

pub const DEFAULT_DB_PATH: &str = "articles.db";

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        uid TEXT NOT NULL,
        topic TEXT NOT NULL,
        source_lang TEXT NOT NULL,
        target_lang TEXT NOT NULL,
        text TEXT NOT NULL,
        translation TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

pub struct SQLiteStorage {
    pool: Arc<SqlitePool>,
}

impl SQLiteStorage {
    pub async fn connect(config: &BackendConfig) -> Result<Self> {
        let path = config.url.strip_prefix("sqlite:").unwrap_or(&config.url);
        Self::new_with_path(&PathBuf::from(path)).await
    }

    pub async fn new_with_path(db_path: &PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| ls_core::Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| ls_core::Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self { pool: Arc::new(pool) })
    }
}

fn row_to_article(row: &SqliteRow) -> Result<Article> {
    let created_at: String = row.get("created_at");
    Ok(Article {
        id: row.get("id"),
        uid: row.get("uid"),
        topic: row.get("topic"),
        source_lang: row.get("source_lang"),
        target_lang: row.get("target_lang"),
        text: row.get("text"),
        translation: row.get::<Option<String>, _>("translation"),
        created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| ls_core::Error::Storage(format!("Failed to parse date: {}", e)))?
            .with_timezone(&chrono::Utc),
    })
}

#[async_trait]
impl ArticleStorage for SQLiteStorage {
    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| ls_core::Error::Storage(format!("Failed to fetch article: {}", e)))?;

        row.as_ref().map(row_to_article).transpose()
    }

    async fn store_article(&self, article: &Article) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO articles
            (id, uid, topic, source_lang, target_lang, text, translation, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.id)
        .bind(&article.uid)
        .bind(&article.topic)
        .bind(&article.source_lang)
        .bind(&article.target_lang)
        .bind(&article.text)
        .bind(article.translation.as_deref())
        .bind(article.created_at.to_rfc3339())
        .execute(&*self.pool)
        .await
        .map_err(|e| ls_core::Error::Storage(format!("Failed to store article: {}", e)))?;

        Ok(())
    }
}
