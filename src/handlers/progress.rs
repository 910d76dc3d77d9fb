use axum::{
  extract::{Path, State},
  response::IntoResponse,
  Json,
};
use serde_json::{json, Map, Value};

use crate::domain::Language;
use crate::state::AppState;

use super::{ApiError, ApiResult};

/// GET /api/progress
///
/// Every supported language appears, including ones with nothing learned yet.
pub async fn progress_overview(State(state): State<AppState>) -> ApiResult {
  let overview = state.progress.progress_overview()?;

  let mut languages = Map::new();
  for (language, progress) in overview {
    languages.insert(
      language.as_str().to_string(),
      serde_json::to_value(progress).unwrap_or(Value::Null),
    );
  }

  Ok(Json(json!({ "success": true, "progress": { "languages": languages } })).into_response())
}

/// GET /api/progress/{language}
pub async fn language_stats(
  State(state): State<AppState>,
  Path(language): Path<String>,
) -> ApiResult {
  let Some(language) = Language::from_str(&language) else {
    return Err(ApiError::NotFound(format!("Unsupported language: {}", language)));
  };

  let stats = state.progress.stats(language)?;
  Ok(Json(json!({ "success": true, "language": language, "stats": stats })).into_response())
}
