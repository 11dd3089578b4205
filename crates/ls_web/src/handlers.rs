use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use ls_core::{AnalysisResponse, AnalyzeTextRequest, Article, CreateArticleRequest};
use crate::callable::{CallableRequest, CallableResponse};
use crate::{ApiError, AppState};

fn bad_payload(rejection: JsonRejection) -> ls_core::Error {
    ls_core::Error::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CallableRequest<CreateArticleRequest>>, JsonRejection>,
) -> Result<Json<CallableResponse<Article>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::CreateArticle(bad_payload(e)))?;
    info!(request = ?request.data, "createArticle called");

    let article = state
        .generator
        .create_article(&request.data)
        .await
        .map_err(ApiError::CreateArticle)?;

    Ok(Json(CallableResponse::new(article)))
}

/// Replaces the article on screen with a newly generated one. The previous
/// article stays in the store untouched; the result has a fresh id.
pub async fn regenerate_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CallableRequest<CreateArticleRequest>>, JsonRejection>,
) -> Result<Json<CallableResponse<Article>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::RegenerateContent(bad_payload(e)))?;
    info!(request = ?request.data, "regenerateContent called");

    let article = state
        .generator
        .create_article(&request.data)
        .await
        .map_err(ApiError::RegenerateContent)?;

    Ok(Json(CallableResponse::new(article)))
}

pub async fn analyze_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CallableRequest<AnalyzeTextRequest>>, JsonRejection>,
) -> Result<Json<CallableResponse<AnalysisResponse>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::AnalyzeText(bad_payload(e)))?;
    info!(request = ?request.data, "analyzeText called");

    let response = state
        .analyzer
        .analyze_text(&request.data)
        .await
        .map_err(ApiError::AnalyzeText)?;

    Ok(Json(CallableResponse::new(response)))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "status": "ok", "model": state.model_name() }))
}
