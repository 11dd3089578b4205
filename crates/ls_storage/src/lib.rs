use ls_core::{ArticleStorage, Result};
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

/// Where a backend keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn with_url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }
}

/// Build a storage backend by name.
///
/// `backend_url` is ignored by the in-memory backend; for SQLite it is the
/// database path (an optional `sqlite:` prefix is accepted).
#[cfg_attr(not(feature = "sqlite"), allow(unused_variables))]
pub async fn create_storage(kind: &str, backend_url: Option<&str>) -> Result<Arc<dyn ArticleStorage>> {
    let storage: Arc<dyn ArticleStorage> = match kind {
        "memory" => Arc::new(InMemoryStorage::new()),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let mut config = BackendConfig::new(backends::sqlite::DEFAULT_DB_PATH);
            if let Some(url) = backend_url {
                config.with_url(url);
            }
            Arc::new(SQLiteStorage::connect(&config).await?)
        }
        other => {
            return Err(ls_core::Error::Storage(format!(
                "Unknown storage backend: {} (available: {})",
                other,
                available_backends().join(", ")
            )))
        }
    };

    info!(backend = kind, "document store ready");
    Ok(storage)
}

pub fn available_backends() -> Vec<&'static str> {
    let mut backends = vec!["memory"];
    if cfg!(feature = "sqlite") {
        backends.push("sqlite");
    }
    backends
}

pub mod prelude {
    pub use super::{create_storage, BackendConfig};
    pub use super::backends::*;
}
