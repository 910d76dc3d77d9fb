use serde::{Deserialize, Serialize};

/// Static description of a supported language
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
  pub name: &'static str,
  pub native_name: &'static str,
  pub flag: &'static str,
  pub code: &'static str,
  pub levels: &'static [&'static str],
  pub default_words: &'static [&'static str],
}

const CEFR_LEVELS: [&str; 6] = ["A1", "A2", "B1", "B2", "C1", "C2"];
const JLPT_LEVELS: [&str; 5] = ["N5", "N4", "N3", "N2", "N1"];

const ENGLISH: LanguageInfo = LanguageInfo {
  name: "English",
  native_name: "English",
  flag: "🇬🇧",
  code: "en",
  levels: &CEFR_LEVELS,
  default_words: &[
    "hello", "world", "learn", "study", "book", "read", "write", "speak", "listen", "practice",
  ],
};

const GERMAN: LanguageInfo = LanguageInfo {
  name: "German",
  native_name: "Deutsch",
  flag: "🇩🇪",
  code: "de",
  levels: &CEFR_LEVELS,
  default_words: &[
    "hallo", "welt", "lernen", "studieren", "buch", "lesen", "schreiben", "sprechen", "hören", "üben",
  ],
};

const FRENCH: LanguageInfo = LanguageInfo {
  name: "French",
  native_name: "Français",
  flag: "🇫🇷",
  code: "fr",
  levels: &CEFR_LEVELS,
  default_words: &[
    "bonjour", "monde", "apprendre", "étudier", "livre", "lire", "écrire", "parler", "écouter",
    "pratiquer",
  ],
};

const JAPANESE: LanguageInfo = LanguageInfo {
  name: "Japanese",
  native_name: "日本語",
  flag: "🇯🇵",
  code: "ja",
  levels: &JLPT_LEVELS,
  default_words: &[
    "こんにちは", "世界", "学ぶ", "勉強", "本", "読む", "書く", "話す", "聞く", "練習",
  ],
};

/// A language supported by the catalog.
///
/// Free-form input from requests goes through [`Language::normalize`], which
/// maps anything unrecognized to [`Language::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  English,
  German,
  French,
  Japanese,
}

impl Language {
  pub const DEFAULT: Language = Language::English;

  pub const ALL: [Language; 4] = [
    Language::English,
    Language::German,
    Language::French,
    Language::Japanese,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::English => "english",
      Self::German => "german",
      Self::French => "french",
      Self::Japanese => "japanese",
    }
  }

  /// Look up a language by catalog key ("german") or ISO code ("de")
  pub fn from_str(s: &str) -> Option<Self> {
    let key = s.trim().to_lowercase();
    Self::ALL
      .into_iter()
      .find(|lang| lang.as_str() == key || lang.info().code == key)
  }

  /// Resolve request input to a catalog language, falling back to the default
  pub fn normalize(s: &str) -> Self {
    Self::from_str(s).unwrap_or_else(|| {
      tracing::warn!("Unknown language '{}', using {}", s, Self::DEFAULT.as_str());
      Self::DEFAULT
    })
  }

  pub fn info(&self) -> &'static LanguageInfo {
    match self {
      Self::English => &ENGLISH,
      Self::German => &GERMAN,
      Self::French => &FRENCH,
      Self::Japanese => &JAPANESE,
    }
  }

  /// Level assigned when the model gives none (third rung of the taxonomy)
  pub fn default_level(&self) -> &'static str {
    let levels = self.info().levels;
    levels.get(2).or(levels.first()).copied().unwrap_or("B1")
  }

  /// First `count` seed words, used when recommendation fails
  pub fn default_words(&self, count: usize) -> Vec<String> {
    self
      .info()
      .default_words
      .iter()
      .take(count)
      .map(|w| w.to_string())
      .collect()
  }
}

impl Default for Language {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl std::fmt::Display for Language {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_str_catalog_keys() {
    assert_eq!(Language::from_str("english"), Some(Language::English));
    assert_eq!(Language::from_str("german"), Some(Language::German));
    assert_eq!(Language::from_str("french"), Some(Language::French));
    assert_eq!(Language::from_str("japanese"), Some(Language::Japanese));
  }

  #[test]
  fn test_from_str_iso_codes_and_case() {
    assert_eq!(Language::from_str("de"), Some(Language::German));
    assert_eq!(Language::from_str(" French "), Some(Language::French));
    assert_eq!(Language::from_str("JA"), Some(Language::Japanese));
  }

  #[test]
  fn test_normalize_unknown_falls_back_to_default() {
    assert_eq!(Language::normalize("klingon"), Language::English);
    assert_eq!(Language::normalize(""), Language::English);
  }

  #[test]
  fn test_as_str_roundtrip() {
    for lang in Language::ALL {
      assert_eq!(Language::from_str(lang.as_str()), Some(lang));
    }
  }

  #[test]
  fn test_default_level() {
    assert_eq!(Language::English.default_level(), "B1");
    assert_eq!(Language::Japanese.default_level(), "N3");
  }

  #[test]
  fn test_default_words_truncates() {
    let words = Language::English.default_words(3);
    assert_eq!(words, vec!["hello", "world", "learn"]);

    // Asking for more than the seed list returns the whole list
    assert_eq!(Language::French.default_words(50).len(), 10);
    assert!(Language::German.default_words(0).is_empty());
  }

  #[test]
  fn test_serde_lowercase() {
    let json = serde_json::to_string(&Language::Japanese).unwrap();
    assert_eq!(json, "\"japanese\"");
    let parsed: Language = serde_json::from_str("\"german\"").unwrap();
    assert_eq!(parsed, Language::German);
  }
}
