use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use super::Language;

/// Review status of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
  #[default]
  Learning,
  Reviewing,
  Mastered,
}

impl CardStatus {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "learning" => Some(Self::Learning),
      "reviewing" => Some(Self::Reviewing),
      "mastered" => Some(Self::Mastered),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Learning => "learning",
      Self::Reviewing => "reviewing",
      Self::Mastered => "mastered",
    }
  }
}

/// An example sentence with its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
  pub sentence: String,
  pub translation: String,
}

/// One sense of a word
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Definition {
  #[serde(default)]
  pub pos: String,
  #[serde(default)]
  pub meaning: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub example: Option<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub word: String,
  #[serde(default, deserialize_with = "lenient_language")]
  pub language: Language,
  #[serde(default)]
  pub phonetic: String,
  #[serde(default)]
  pub level: String,
  #[serde(default)]
  pub definitions: Vec<Definition>,
  /// Definition-embedded examples first, then any standalone ones
  #[serde(default)]
  pub examples: Vec<Example>,

  // Grammar tables (HTML) the model provides for verbs, adjectives and nouns
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub conjugation: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub inflection: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub declension: Option<String>,

  #[serde(default)]
  pub etymology: String,
  #[serde(default)]
  pub tips: String,

  #[serde(default)]
  pub status: CardStatus,
  #[serde(default = "Utc::now")]
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub last_reviewed: Option<DateTime<Utc>>,
  #[serde(default)]
  pub review_count: u32,
}

impl Card {
  /// Empty card with a fresh id, ready to be filled with content
  pub fn new(word: String, language: Language) -> Self {
    Self {
      id: generate_card_id(),
      word,
      language,
      phonetic: String::new(),
      level: String::new(),
      definitions: Vec::new(),
      examples: Vec::new(),
      conjugation: None,
      inflection: None,
      declension: None,
      etymology: String::new(),
      tips: String::new(),
      status: CardStatus::Learning,
      created_at: Utc::now(),
      last_reviewed: None,
      review_count: 0,
    }
  }

  /// Replace every field with `fresh` except the identity and review status
  pub fn replace_content(&mut self, fresh: Card) {
    let id = std::mem::take(&mut self.id);
    let status = self.status;
    *self = Card { id, status, ..fresh };
  }

  /// Record a review that moved the card to `status`
  pub fn mark_reviewed(&mut self, status: CardStatus) {
    self.status = status;
    self.last_reviewed = Some(Utc::now());
    self.review_count += 1;
  }
}

/// Generate a card id of the form `card_<millis>_<9 base36 chars>`
pub fn generate_card_id() -> String {
  format!("card_{}_{}", Utc::now().timestamp_millis(), random_base36(9))
}

pub(crate) fn random_base36(len: usize) -> String {
  let mut rng = rand::rng();
  (0..len)
    .map(|_| {
      let idx = rng.random_range(0..36u8);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

fn lenient_language<'de, D>(deserializer: D) -> Result<Language, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<String>::deserialize(deserializer)?;
  Ok(raw.map(|s| Language::normalize(&s)).unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_card() -> Card {
    let mut card = Card::new("apple".to_string(), Language::English);
    card.phonetic = "/ˈæp.əl/".to_string();
    card.level = "A1".to_string();
    card.definitions = vec![Definition {
      pos: "n.".to_string(),
      meaning: "苹果".to_string(),
      example: None,
    }];
    card
  }

  #[test]
  fn test_card_status_from_str() {
    assert_eq!(CardStatus::from_str("learning"), Some(CardStatus::Learning));
    assert_eq!(CardStatus::from_str("reviewing"), Some(CardStatus::Reviewing));
    assert_eq!(CardStatus::from_str("mastered"), Some(CardStatus::Mastered));
    assert_eq!(CardStatus::from_str("Mastered"), None);
    assert_eq!(CardStatus::from_str(""), None);
  }

  #[test]
  fn test_card_status_as_str_roundtrip() {
    for status in [CardStatus::Learning, CardStatus::Reviewing, CardStatus::Mastered] {
      assert_eq!(CardStatus::from_str(status.as_str()), Some(status));
    }
  }

  #[test]
  fn test_card_new_defaults() {
    let card = Card::new("book".to_string(), Language::German);
    assert!(card.id.starts_with("card_"));
    assert_eq!(card.word, "book");
    assert_eq!(card.language, Language::German);
    assert_eq!(card.status, CardStatus::Learning);
    assert_eq!(card.review_count, 0);
    assert!(card.last_reviewed.is_none());
    assert!(card.definitions.is_empty());
  }

  #[test]
  fn test_generated_ids_are_distinct() {
    let a = generate_card_id();
    let b = generate_card_id();
    assert_ne!(a, b);
    let suffix = a.rsplit('_').next().unwrap();
    assert_eq!(suffix.len(), 9);
    assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
  }

  #[test]
  fn test_replace_content_keeps_id_and_status() {
    let mut card = sample_card();
    card.status = CardStatus::Mastered;
    let original_id = card.id.clone();

    let mut fresh = Card::new("apple".to_string(), Language::English);
    fresh.phonetic = "/new/".to_string();
    fresh.tips = "fresh tips".to_string();
    fresh.review_count = 0;

    card.review_count = 4;
    card.replace_content(fresh.clone());

    assert_eq!(card.id, original_id);
    assert_eq!(card.status, CardStatus::Mastered);
    assert_eq!(card.phonetic, "/new/");
    assert_eq!(card.tips, "fresh tips");
    assert_eq!(card.review_count, 0);
    assert!(card.definitions.is_empty());
    assert_eq!(card.created_at, fresh.created_at);
  }

  #[test]
  fn test_mark_reviewed() {
    let mut card = sample_card();
    card.mark_reviewed(CardStatus::Reviewing);
    card.mark_reviewed(CardStatus::Mastered);
    assert_eq!(card.status, CardStatus::Mastered);
    assert_eq!(card.review_count, 2);
    assert!(card.last_reviewed.is_some());
  }

  #[test]
  fn test_serializes_camel_case() {
    let card = sample_card();
    let value = serde_json::to_value(&card).unwrap();
    assert!(value.get("createdAt").is_some());
    assert!(value.get("reviewCount").is_some());
    assert_eq!(value["lastReviewed"], serde_json::Value::Null);
    assert_eq!(value["status"], "learning");
    assert_eq!(value["language"], "english");
    // Absent grammar tables are omitted
    assert!(value.get("conjugation").is_none());
    // Definitions without an example omit the key
    assert!(value["definitions"][0].get("example").is_none());
  }

  #[test]
  fn test_deserialize_minimal_client_card() {
    let card: Card = serde_json::from_str(r#"{"word": "Haus", "language": "GERMAN"}"#).unwrap();
    assert_eq!(card.word, "Haus");
    assert_eq!(card.language, Language::German);
    assert_eq!(card.status, CardStatus::Learning);
    assert!(card.id.is_empty());
  }

  #[test]
  fn test_deserialize_unknown_language_is_coerced() {
    let card: Card = serde_json::from_str(r#"{"word": "x", "language": "elvish"}"#).unwrap();
    assert_eq!(card.language, Language::English);

    let card: Card = serde_json::from_str(r#"{"word": "x", "language": null}"#).unwrap();
    assert_eq!(card.language, Language::English);
  }
}
