//! HTTP surface: routes, handlers and error → status mapping.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::core::{ApiResponse, Candidate, CandidateUpdate, NewCandidate};
use crate::error::RegistryError;
use crate::service::CandidateService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CandidateService>,
}

impl AppState {
    pub fn new(service: CandidateService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    candidates: u64,
    ranker: String,
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/candidates", get(list_handler).post(create_handler))
        .route("/candidates/search", get(search_handler))
        .route(
            "/candidates/:id",
            get(get_handler)
                .put(update_handler)
                .patch(update_handler)
                .delete(delete_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        candidates: state.service.count().await?,
        ranker: state.service.ranker_name().to_string(),
    }))
}

async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Candidate>>, AppError> {
    Ok(Json(state.service.list().await?))
}

async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Candidate>>), AppError> {
    let Json(payload) = payload?;
    let candidate = state.service.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Candidate created successfully", candidate)),
    ))
}

async fn get_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Candidate>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.service.get(id).await?))
}

async fn update_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CandidateUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let candidate = state.service.update(id, payload).await?;
    Ok(Json(ApiResponse::success("Candidate updated successfully", candidate)))
}

async fn delete_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let query = params.query.unwrap_or_default();
    let results = state.service.search(&query).await?;

    tracing::info!("🔍 '{}' → {} candidates", query, results.len());

    Ok(Json(results))
}

// Error handling
//
// Registry errors carry their own mapping; extractor rejections are
// turned into JSON bodies here instead of axum's plain-text defaults.
pub enum AppError {
    Registry(RegistryError),
    /// Unreadable request body (400, or 415 without a JSON content type)
    Body(StatusCode, String),
    /// Path segment that cannot name a candidate (404)
    UnknownPath(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Registry(RegistryError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, json!(errors))
            }
            AppError::Registry(RegistryError::MissingQuery) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": RegistryError::MissingQuery.to_string() }),
            ),
            AppError::Registry(RegistryError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                json!({ "message": RegistryError::NotFound(id).to_string() }),
            ),
            AppError::Registry(e) => {
                tracing::error!("❌ Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
            }
            AppError::Body(status, message) => (status, json!({ "message": message })),
            AppError::UnknownPath(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
        };

        if status.is_client_error() {
            tracing::warn!("{} - {}", status, body);
        }

        (status, Json(body)).into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        AppError::Registry(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        AppError::Body(status, rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::UnknownPath(rejection.body_text())
    }
}
