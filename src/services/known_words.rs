//! Words a learner already knows in a language

use std::collections::HashSet;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::db::{CollectionStore, LogOnError, ProgressStore, StoreResult};
use crate::domain::Language;

/// Canonical comparison form: NFC, trimmed, lower-cased
pub fn fold_word(word: &str) -> String {
    word.trim().nfc().collect::<String>().to_lowercase()
}

/// Ordered, de-duplicated set of folded words.
///
/// Insertion order is kept so that prompts can list the most recent words.
#[derive(Debug, Clone, Default)]
pub struct KnownWords {
    ordered: Vec<String>,
    set: HashSet<String>,
}

impl KnownWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the word was already known or folds to nothing
    pub fn insert(&mut self, word: &str) -> bool {
        let folded = fold_word(word);
        if folded.is_empty() || self.set.contains(&folded) {
            return false;
        }
        self.set.insert(folded.clone());
        self.ordered.push(folded);
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(&fold_word(word))
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// The last `n` words added
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.ordered.len().saturating_sub(n);
        &self.ordered[start..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for KnownWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut known = Self::new();
        for word in iter {
            known.insert(word.as_ref());
        }
        known
    }
}

/// Merges recorded learned words with words already carded in collections
#[derive(Clone)]
pub struct KnownWordsAggregator {
    collections: Arc<dyn CollectionStore>,
    progress: Arc<dyn ProgressStore>,
}

impl KnownWordsAggregator {
    pub fn new(collections: Arc<dyn CollectionStore>, progress: Arc<dyn ProgressStore>) -> Self {
        Self {
            collections,
            progress,
        }
    }

    /// Learned words first, then carded words from the oldest collection to
    /// the newest. Collection errors are logged and skipped.
    pub fn known_words(&self, language: Language) -> StoreResult<KnownWords> {
        let mut known: KnownWords = self.progress.learned_words(language)?.into_iter().collect();

        let collections = self
            .collections
            .list_collections()
            .log_warn_default("Could not read collections for known words");

        for collection in collections.iter().rev().filter(|c| c.language == language) {
            for card in &collection.cards {
                known.insert(&card.word);
            }
        }

        tracing::debug!("{} known {} words", known.len(), language);
        Ok(known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Card;
    use crate::testing::{memory_store, FailingStore};

    #[test]
    fn test_fold_word() {
        assert_eq!(fold_word("  Hello "), "hello");
        // Decomposed e + combining acute folds to the precomposed form
        assert_eq!(fold_word("E\u{301}tudier"), "étudier");
        assert_eq!(fold_word("Ärger"), "ärger");
    }

    #[test]
    fn test_known_words_dedup_and_order() {
        let known: KnownWords = ["Hello", "world", "HELLO", "", "study"].into_iter().collect();
        assert_eq!(known.len(), 3);
        assert!(known.contains("hello"));
        assert!(known.contains("WORLD"));
        assert!(!known.contains("book"));
        assert_eq!(known.iter().collect::<Vec<_>>(), vec!["hello", "world", "study"]);
    }

    #[test]
    fn test_recent_takes_tail() {
        let known: KnownWords = (0..60).map(|i| format!("w{}", i)).collect();
        let recent = known.recent(50);
        assert_eq!(recent.len(), 50);
        assert_eq!(recent[0], "w10");
        assert_eq!(recent[49], "w59");
        assert_eq!(known.recent(100).len(), 60);
    }

    #[test]
    fn test_aggregates_learned_and_carded_words() {
        let store = memory_store();
        store
            .record_learned_words(Language::English, &["hello".to_string()])
            .unwrap();
        store
            .create_collection(
                Language::English,
                vec![
                    Card::new("World".to_string(), Language::English),
                    Card::new("hello".to_string(), Language::English),
                ],
            )
            .unwrap();
        store
            .create_collection(
                Language::German,
                vec![Card::new("haus".to_string(), Language::German)],
            )
            .unwrap();

        let aggregator = KnownWordsAggregator::new(store.clone(), store);
        let known = aggregator.known_words(Language::English).unwrap();
        assert_eq!(known.iter().collect::<Vec<_>>(), vec!["hello", "world"]);
        assert!(!known.contains("haus"));
    }

    #[test]
    fn test_collection_failure_degrades_to_learned_words() {
        let store = memory_store();
        store
            .record_learned_words(Language::French, &["livre".to_string()])
            .unwrap();

        let aggregator = KnownWordsAggregator::new(Arc::new(FailingStore), store);
        let known = aggregator.known_words(Language::French).unwrap();
        assert_eq!(known.len(), 1);
        assert!(known.contains("livre"));
    }

    #[test]
    fn test_progress_failure_is_an_error() {
        let aggregator = KnownWordsAggregator::new(memory_store(), Arc::new(FailingStore));
        assert!(aggregator.known_words(Language::English).is_err());
    }
}
