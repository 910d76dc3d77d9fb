use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::random_base36;
use super::{Card, CardStatus, Language};

/// Per-status card counts for a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
  pub learning: usize,
  pub reviewing: usize,
  pub mastered: usize,
}

impl CollectionStats {
  pub fn from_cards(cards: &[Card]) -> Self {
    let mut stats = Self::default();
    for card in cards {
      match card.status {
        CardStatus::Learning => stats.learning += 1,
        CardStatus::Reviewing => stats.reviewing += 1,
        CardStatus::Mastered => stats.mastered += 1,
      }
    }
    stats
  }
}

/// A saved group of cards for one language
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
  pub id: String,
  pub language: Language,
  pub cards: Vec<Card>,
  pub created_at: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
  pub total_cards: usize,
  pub stats: CollectionStats,
}

impl Collection {
  pub fn new(language: Language, cards: Vec<Card>) -> Self {
    let mut collection = Self {
      id: generate_collection_id(),
      language,
      cards,
      created_at: Utc::now(),
      updated_at: None,
      total_cards: 0,
      stats: CollectionStats::default(),
    };
    collection.recount();
    collection
  }

  /// Recompute `total_cards` and `stats` from the card list
  pub fn recount(&mut self) {
    self.total_cards = self.cards.len();
    self.stats = CollectionStats::from_cards(&self.cards);
  }

  pub fn card_index(&self, card_id: &str) -> Option<usize> {
    self.cards.iter().position(|c| c.id == card_id)
  }
}

/// Collection id of the form `collection_<YYYY-MM-DDTHH-MM-SS>_<6 base36 chars>`
pub fn generate_collection_id() -> String {
  format!(
    "collection_{}_{}",
    Utc::now().format("%Y-%m-%dT%H-%M-%S"),
    random_base36(6)
  )
}
