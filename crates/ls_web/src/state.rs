use std::sync::Arc;
use ls_core::{ArticleStorage, InferenceModel};
use ls_inference::{ArticleGenerator, SpanAnalyzer};

pub struct AppState {
    pub generator: ArticleGenerator,
    pub analyzer: SpanAnalyzer,
}

impl AppState {
    pub fn new(model: Arc<dyn InferenceModel>, storage: Arc<dyn ArticleStorage>) -> Self {
        Self {
            generator: ArticleGenerator::new(model.clone(), storage.clone()),
            analyzer: SpanAnalyzer::new(model, storage),
        }
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }
}
