//! Application state shared by all handlers.

use std::sync::Arc;

use crate::config::AiConfig;
use crate::db::{CollectionStore, ProgressStore, SqliteStore};
use crate::services::{CardGenerationEngine, CompletionClient, KnownWordsAggregator, RecommendationEngine};

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// Saved card collections
  pub collections: Arc<dyn CollectionStore>,

  /// Learned words and derived statistics
  pub progress: Arc<dyn ProgressStore>,

  pub recommender: Arc<RecommendationEngine>,
  pub generator: Arc<CardGenerationEngine>,
}

impl AppState {
  pub fn new(
    collections: Arc<dyn CollectionStore>,
    progress: Arc<dyn ProgressStore>,
    client: Arc<dyn CompletionClient>,
    config: &AiConfig,
  ) -> Self {
    let known_words = KnownWordsAggregator::new(collections.clone(), progress.clone());
    let recommender = RecommendationEngine::new(client.clone(), known_words, progress.clone(), config);
    let generator = CardGenerationEngine::new(client, config);

    Self {
      collections,
      progress,
      recommender: Arc::new(recommender),
      generator: Arc::new(generator),
    }
  }

  /// State where one SQLite store backs both collections and progress
  pub fn with_sqlite(store: SqliteStore, client: Arc<dyn CompletionClient>, config: &AiConfig) -> Self {
    let store = Arc::new(store);
    Self::new(store.clone(), store, client, config)
  }
}
