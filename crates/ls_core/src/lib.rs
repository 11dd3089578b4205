pub mod models;
pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::InferenceModel;
pub use storage::ArticleStorage;
pub use types::{
    AnalysisResponse, AnalysisResult, AnalyzeTextRequest, Article, CreateArticleRequest,
    Exercise, GenerationConfig, GrammarEntry, SpanContext, VocabularyEntry,
};
