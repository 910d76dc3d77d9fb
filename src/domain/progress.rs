use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Learner proficiency, derived from how many words have been learned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProficiencyLevel {
  #[default]
  Beginner,
  Elementary,
  Intermediate,
  UpperIntermediate,
  Advanced,
  Proficient,
}

impl ProficiencyLevel {
  pub fn from_word_count(count: usize) -> Self {
    match count {
      0..50 => Self::Beginner,
      50..200 => Self::Elementary,
      200..500 => Self::Intermediate,
      500..1000 => Self::UpperIntermediate,
      1000..2000 => Self::Advanced,
      _ => Self::Proficient,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Elementary => "elementary",
      Self::Intermediate => "intermediate",
      Self::UpperIntermediate => "upper-intermediate",
      Self::Advanced => "advanced",
      Self::Proficient => "proficient",
    }
  }
}

/// Learning statistics for one language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
  pub level: ProficiencyLevel,
  pub total_words: usize,
  pub last_updated: Option<DateTime<Utc>>,
}

impl LearningStats {
  pub fn from_count(total_words: usize, last_updated: Option<DateTime<Utc>>) -> Self {
    Self {
      level: ProficiencyLevel::from_word_count(total_words),
      total_words,
      last_updated,
    }
  }
}

/// Progress for one language as shown on the overview
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProgress {
  pub level: ProficiencyLevel,
  pub learned_words: Vec<String>,
  pub total_words: usize,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_level_thresholds() {
    assert_eq!(ProficiencyLevel::from_word_count(0), ProficiencyLevel::Beginner);
    assert_eq!(ProficiencyLevel::from_word_count(49), ProficiencyLevel::Beginner);
    assert_eq!(ProficiencyLevel::from_word_count(50), ProficiencyLevel::Elementary);
    assert_eq!(ProficiencyLevel::from_word_count(199), ProficiencyLevel::Elementary);
    assert_eq!(ProficiencyLevel::from_word_count(200), ProficiencyLevel::Intermediate);
    assert_eq!(ProficiencyLevel::from_word_count(500), ProficiencyLevel::UpperIntermediate);
    assert_eq!(ProficiencyLevel::from_word_count(1000), ProficiencyLevel::Advanced);
    assert_eq!(ProficiencyLevel::from_word_count(1999), ProficiencyLevel::Advanced);
    assert_eq!(ProficiencyLevel::from_word_count(2000), ProficiencyLevel::Proficient);
  }

  #[test]
  fn test_level_serializes_kebab_case() {
    let json = serde_json::to_string(&ProficiencyLevel::UpperIntermediate).unwrap();
    assert_eq!(json, "\"upper-intermediate\"");
    assert_eq!(ProficiencyLevel::UpperIntermediate.as_str(), "upper-intermediate");
  }

  #[test]
  fn test_stats_from_count() {
    let stats = LearningStats::from_count(230, None);
    assert_eq!(stats.level, ProficiencyLevel::Intermediate);
    assert_eq!(stats.total_words, 230);

    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["totalWords"], 230);
    assert_eq!(value["level"], "intermediate");
  }
}
