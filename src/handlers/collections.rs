//! Saved collection endpoints.

use axum::{
  extract::{Path, State},
  response::IntoResponse,
  Json,
};
use serde_json::json;

use crate::state::AppState;

use super::{ApiError, ApiResult};

/// GET /api/collections
pub async fn list_collections(State(state): State<AppState>) -> ApiResult {
  let collections = state.collections.list_collections()?;
  Ok(Json(json!({ "success": true, "collections": collections })).into_response())
}

/// GET /api/collections/{id}
pub async fn get_collection(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
  match state.collections.get_collection(&id)? {
    Some(collection) => Ok(Json(json!({ "success": true, "collection": collection })).into_response()),
    None => Err(ApiError::NotFound("Collection not found".to_string())),
  }
}

/// DELETE /api/collections/{id}
pub async fn delete_collection(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
  if !state.collections.delete_collection(&id)? {
    return Err(ApiError::NotFound("Collection not found".to_string()));
  }

  tracing::info!("Deleted collection {}", id);
  Ok(Json(json!({ "success": true, "message": "Collection deleted" })).into_response())
}
