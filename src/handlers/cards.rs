//! Recommendation, generation and card-saving endpoints.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::config::{DEFAULT_RECOMMEND_COUNT, MAX_BATCH_CARDS};
use crate::db::LogOnError;
use crate::domain::{Card, CardStatus};
use crate::state::AppState;

use super::{request_language, ApiError, ApiResult};

fn non_blank(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
  pub language: Option<String>,
  pub count: Option<usize>,
}

/// POST /api/recommend-words
pub async fn recommend_words(
  State(state): State<AppState>,
  Json(request): Json<RecommendRequest>,
) -> impl IntoResponse {
  let language = request_language(request.language.as_deref());
  let count = request.count.unwrap_or(DEFAULT_RECOMMEND_COUNT);

  let words = state.recommender.recommend_words(language.as_str(), count).await;

  Json(json!({ "success": true, "count": words.len(), "words": words }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
  pub custom_prompt: Option<String>,
  pub language: Option<String>,
  pub count: Option<usize>,
}

/// POST /api/generate-preview
///
/// Recommends words (from the learner's progress, or from a free-text
/// request) and generates an unsaved card for each.
pub async fn generate_preview(
  State(state): State<AppState>,
  Json(request): Json<PreviewRequest>,
) -> impl IntoResponse {
  let language = request_language(request.language.as_deref());
  let count = request
    .count
    .unwrap_or(DEFAULT_RECOMMEND_COUNT)
    .min(MAX_BATCH_CARDS);

  let words = match non_blank(request.custom_prompt) {
    Some(prompt) => {
      state
        .recommender
        .recommend_words_with_prompt(language.as_str(), &prompt, count)
        .await
    }
    None => state.recommender.recommend_words(language.as_str(), count).await,
  };

  let cards = state.generator.generate_cards(&words, language.as_str()).await;

  Json(json!({ "success": true, "count": cards.len(), "cards": cards }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSelectedRequest {
  #[serde(default)]
  pub cards: Vec<Card>,
  pub language: Option<String>,
}

/// POST /api/save-selected-cards
pub async fn save_selected_cards(
  State(state): State<AppState>,
  Json(request): Json<SaveSelectedRequest>,
) -> ApiResult {
  if request.cards.is_empty() {
    return Err(ApiError::BadRequest("No cards selected".to_string()));
  }

  let language = request_language(request.language.as_deref());
  let words: Vec<String> = request.cards.iter().map(|c| c.word.clone()).collect();

  let collection = state.collections.create_collection(language, request.cards)?;
  state
    .progress
    .record_learned_words(language, &words)
    .log_warn("Failed to record learned words");

  Ok(
    (
      StatusCode::OK,
      Json(json!({
        "success": true,
        "savedCount": collection.total_cards,
        "collection": collection,
      })),
    )
      .into_response(),
  )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSingleRequest {
  pub card: Option<Card>,
  pub language: Option<String>,
}

/// POST /api/save-single-card
///
/// Adds the card to the newest collection of the language, creating one if
/// needed. A card with the same word is replaced.
pub async fn save_single_card(
  State(state): State<AppState>,
  Json(request): Json<SaveSingleRequest>,
) -> ApiResult {
  let card = match request.card {
    Some(card) if !card.word.trim().is_empty() => card,
    _ => return Err(ApiError::BadRequest("Invalid card data".to_string())),
  };

  let language = request_language(request.language.as_deref());
  let word = card.word.clone();

  let target = state.collections.get_or_create_collection(language)?;
  let collection = state.collections.add_card(&target.id, card)?;
  state
    .progress
    .record_learned_words(language, std::slice::from_ref(&word))
    .log_warn("Failed to record learned word");

  Ok(
    (
      StatusCode::OK,
      Json(json!({
        "success": true,
        "message": format!("Saved: {}", word),
        "collection": collection,
      })),
    )
      .into_response(),
  )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
  pub card_id: Option<String>,
  pub word: Option<String>,
  pub language: Option<String>,
  pub collection_id: Option<String>,
}

/// POST /api/regenerate-card
pub async fn regenerate_card(
  State(state): State<AppState>,
  Json(request): Json<RegenerateRequest>,
) -> ApiResult {
  let (Some(card_id), Some(word), Some(collection_id)) = (
    non_blank(request.card_id),
    non_blank(request.word),
    non_blank(request.collection_id),
  ) else {
    return Err(ApiError::BadRequest(
      "cardId, word and collectionId are required".to_string(),
    ));
  };
  let language = request_language(request.language.as_deref());

  let collection = state
    .generator
    .regenerate_card(
      &*state.collections,
      &collection_id,
      &card_id,
      &word,
      language.as_str(),
    )
    .await?;

  Ok(
    (
      StatusCode::OK,
      Json(json!({
        "success": true,
        "message": format!("Regenerated: {}", word),
        "collection": collection,
      })),
    )
      .into_response(),
  )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCardsRequest {
  pub words: Option<Vec<String>>,
  pub language: Option<String>,
  pub count: Option<usize>,
  #[serde(default)]
  pub auto_recommend: bool,
}

/// POST /api/generate-cards
///
/// Generates cards for the given words (or recommended ones) and saves them
/// as a new collection.
pub async fn generate_cards(
  State(state): State<AppState>,
  Json(request): Json<GenerateCardsRequest>,
) -> ApiResult {
  let language = request_language(request.language.as_deref());
  let count = request
    .count
    .unwrap_or(DEFAULT_RECOMMEND_COUNT)
    .min(MAX_BATCH_CARDS);

  let words: Vec<String> = if request.auto_recommend {
    state.recommender.recommend_words(language.as_str(), count).await
  } else {
    let words: Vec<String> = request
      .words
      .unwrap_or_default()
      .into_iter()
      .filter_map(|w| non_blank(Some(w)))
      .take(count)
      .collect();
    if words.is_empty() {
      return Err(ApiError::BadRequest(
        "Provide a list of words or enable autoRecommend".to_string(),
      ));
    }
    words
  };

  let cards = state.generator.generate_cards(&words, language.as_str()).await;
  let collection = state.collections.create_collection(language, cards)?;
  state
    .progress
    .record_learned_words(language, &words)
    .log_warn("Failed to record learned words");

  Ok(
    (
      StatusCode::OK,
      Json(json!({
        "success": true,
        "autoRecommended": request.auto_recommend,
        "collection": collection,
      })),
    )
      .into_response(),
  )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
  pub status: String,
  pub collection_id: Option<String>,
}

/// PATCH /api/cards/{id}/status
pub async fn update_card_status(
  State(state): State<AppState>,
  Path(card_id): Path<String>,
  Json(request): Json<StatusRequest>,
) -> ApiResult {
  let Some(status) = CardStatus::from_str(&request.status) else {
    return Err(ApiError::BadRequest(format!("Invalid status: {}", request.status)));
  };
  let Some(collection_id) = non_blank(request.collection_id) else {
    return Err(ApiError::BadRequest("collectionId is required".to_string()));
  };

  let collection = state
    .collections
    .update_card_status(&collection_id, &card_id, status)?;

  Ok((StatusCode::OK, Json(json!({ "success": true, "collection": collection }))).into_response())
}
