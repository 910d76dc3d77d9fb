//! JSON API under `/api`, plus the static front-end.

pub mod cards;
pub mod collections;
pub mod progress;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, patch, post},
  Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::db::StoreError;
use crate::domain::Language;
use crate::paths;
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
  let api = Router::new()
    .route("/recommend-words", post(cards::recommend_words))
    .route("/generate-preview", post(cards::generate_preview))
    .route("/save-selected-cards", post(cards::save_selected_cards))
    .route("/save-single-card", post(cards::save_single_card))
    .route("/regenerate-card", post(cards::regenerate_card))
    .route("/generate-cards", post(cards::generate_cards))
    .route("/cards/{id}/status", patch(cards::update_card_status))
    .route("/collections", get(collections::list_collections))
    .route(
      "/collections/{id}",
      get(collections::get_collection).delete(collections::delete_collection),
    )
    .route("/progress", get(progress::progress_overview))
    .route("/progress/{language}", get(progress::language_stats))
    .route("/languages", get(languages))
    .route("/health", get(health));

  Router::new()
    .nest("/api", api)
    .fallback_service(ServeDir::new(paths::public_dir()))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Error response: `{ "success": false, "error": ... }`
#[derive(Debug)]
pub enum ApiError {
  BadRequest(String),
  NotFound(String),
  Store(StoreError),
}

impl From<StoreError> for ApiError {
  fn from(e: StoreError) -> Self {
    match e {
      StoreError::CollectionNotFound(_) => ApiError::NotFound("Collection not found".to_string()),
      StoreError::CardNotFound(_) => ApiError::NotFound("Card not found".to_string()),
      other => ApiError::Store(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
      ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
      ApiError::Store(e) => {
        tracing::error!("Store error: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };

    (status, Json(json!({ "success": false, "error": message }))).into_response()
  }
}

pub type ApiResult = Result<Response, ApiError>;

/// Language from a request body, defaulting when absent
pub(crate) fn request_language(language: Option<&str>) -> Language {
  language.map(Language::normalize).unwrap_or_default()
}

/// GET /api/languages
pub async fn languages() -> impl IntoResponse {
  let languages: Vec<_> = Language::ALL
    .iter()
    .map(|lang| {
      let mut entry = serde_json::to_value(lang.info()).unwrap_or_default();
      entry["key"] = json!(lang.as_str());
      entry
    })
    .collect();

  Json(json!({ "success": true, "languages": languages }))
}

/// GET /api/health
pub async fn health() -> impl IntoResponse {
  Json(json!({
    "success": true,
    "message": "LingoMem API is running",
    "timestamp": Utc::now().to_rfc3339(),
  }))
}
