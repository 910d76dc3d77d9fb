use chrono::Utc;

use crate::domain::card::generate_card_id;
use crate::domain::{Card, CardStatus, Collection, Language, LanguageProgress, LearningStats};

use super::{collections, progress, try_lock, DbPool, StoreResult};

/// Persistence for card collections
pub trait CollectionStore: Send + Sync {
  /// All collections, newest first
  fn list_collections(&self) -> StoreResult<Vec<Collection>>;

  fn get_collection(&self, id: &str) -> StoreResult<Option<Collection>>;

  /// Save `cards` as a new collection. Cards without an id get one.
  fn create_collection(&self, language: Language, cards: Vec<Card>) -> StoreResult<Collection>;

  /// Replace a stored collection, stamping `updated_at`
  fn update_collection(&self, collection: Collection) -> StoreResult<Collection>;

  /// Returns false when nothing was deleted
  fn delete_collection(&self, id: &str) -> StoreResult<bool>;

  /// Latest collection of the language, created empty if there is none
  fn get_or_create_collection(&self, language: Language) -> StoreResult<Collection>;

  fn add_card(&self, collection_id: &str, card: Card) -> StoreResult<Collection>;

  /// Replace the content of one card, keeping its id and status. The read and
  /// the write happen as one step.
  fn replace_card(&self, collection_id: &str, card_id: &str, fresh: Card) -> StoreResult<Collection>;

  fn update_card_status(
    &self,
    collection_id: &str,
    card_id: &str,
    status: CardStatus,
  ) -> StoreResult<Collection>;
}

/// Persistence for learned words and the statistics derived from them
pub trait ProgressStore: Send + Sync {
  fn learned_words(&self, language: Language) -> StoreResult<Vec<String>>;

  fn stats(&self, language: Language) -> StoreResult<LearningStats>;

  fn record_learned_words(&self, language: Language, words: &[String]) -> StoreResult<usize>;

  fn progress_overview(&self) -> StoreResult<Vec<(Language, LanguageProgress)>>;
}

/// Both stores over the shared SQLite connection
#[derive(Clone)]
pub struct SqliteStore {
  pool: DbPool,
}

impl SqliteStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

impl CollectionStore for SqliteStore {
  fn list_collections(&self) -> StoreResult<Vec<Collection>> {
    let conn = try_lock(&self.pool)?;
    collections::list_collections(&conn)
  }

  fn get_collection(&self, id: &str) -> StoreResult<Option<Collection>> {
    let conn = try_lock(&self.pool)?;
    collections::get_collection(&conn, id)
  }

  fn create_collection(&self, language: Language, mut cards: Vec<Card>) -> StoreResult<Collection> {
    for card in cards.iter_mut().filter(|c| c.id.is_empty()) {
      card.id = generate_card_id();
    }
    let collection = Collection::new(language, cards);

    let conn = try_lock(&self.pool)?;
    collections::insert_collection(&conn, &collection)?;
    tracing::info!(
      "Saved collection {} ({} cards)",
      collection.id,
      collection.total_cards
    );
    Ok(collection)
  }

  fn update_collection(&self, mut collection: Collection) -> StoreResult<Collection> {
    collection.updated_at = Some(Utc::now());
    collection.recount();

    let conn = try_lock(&self.pool)?;
    collections::save_collection(&conn, &collection)?;
    tracing::info!("Updated collection {}", collection.id);
    Ok(collection)
  }

  fn delete_collection(&self, id: &str) -> StoreResult<bool> {
    let conn = try_lock(&self.pool)?;
    let deleted = collections::delete_collection(&conn, id)?;
    if deleted {
      tracing::info!("Deleted collection {}", id);
    }
    Ok(deleted)
  }

  fn get_or_create_collection(&self, language: Language) -> StoreResult<Collection> {
    let conn = try_lock(&self.pool)?;
    if let Some(id) = collections::latest_collection_id(&conn, language)? {
      if let Some(collection) = collections::get_collection(&conn, &id)? {
        return Ok(collection);
      }
    }

    let collection = Collection::new(language, Vec::new());
    collections::insert_collection(&conn, &collection)?;
    tracing::info!("Created empty {} collection {}", language, collection.id);
    Ok(collection)
  }

  fn add_card(&self, collection_id: &str, card: Card) -> StoreResult<Collection> {
    let conn = try_lock(&self.pool)?;
    let word = card.word.clone();
    let collection = collections::add_card(&conn, collection_id, card)?;
    tracing::info!("Saved card '{}' to {}", word, collection_id);
    Ok(collection)
  }

  fn replace_card(&self, collection_id: &str, card_id: &str, fresh: Card) -> StoreResult<Collection> {
    let conn = try_lock(&self.pool)?;
    let collection = collections::replace_card(&conn, collection_id, card_id, fresh)?;
    tracing::info!("Replaced card {} in {}", card_id, collection_id);
    Ok(collection)
  }

  fn update_card_status(
    &self,
    collection_id: &str,
    card_id: &str,
    status: CardStatus,
  ) -> StoreResult<Collection> {
    let conn = try_lock(&self.pool)?;
    let collection = collections::update_card_status(&conn, collection_id, card_id, status)?;
    tracing::info!("Card {} -> {}", card_id, status.as_str());
    Ok(collection)
  }
}

impl ProgressStore for SqliteStore {
  fn learned_words(&self, language: Language) -> StoreResult<Vec<String>> {
    let conn = try_lock(&self.pool)?;
    progress::get_learned_words(&conn, language)
  }

  fn stats(&self, language: Language) -> StoreResult<LearningStats> {
    let conn = try_lock(&self.pool)?;
    progress::get_learning_stats(&conn, language)
  }

  fn record_learned_words(&self, language: Language, words: &[String]) -> StoreResult<usize> {
    let conn = try_lock(&self.pool)?;
    let added = progress::record_learned_words(&conn, language, words)?;
    tracing::debug!("Recorded {} new {} words", added, language);
    Ok(added)
  }

  fn progress_overview(&self) -> StoreResult<Vec<(Language, LanguageProgress)>> {
    let conn = try_lock(&self.pool)?;
    progress::get_progress_overview(&conn)
  }
}
