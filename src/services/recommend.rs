//! Word recommendation: known words in, fresh words out

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::config::AiConfig;
use crate::db::ProgressStore;
use crate::domain::Language;
use crate::prompts;

use super::completion::{CompletionClient, CompletionOptions, CompletionRequest};
use super::known_words::KnownWordsAggregator;
use super::{complete_bounded, GenerationError};

/// Leading list markers: `1.` `2)` `-` `*`
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+[.)]|[-*])\s*").expect("valid regex"));

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,，。.;；:：]").expect("valid regex"));

/// Latin letters with German/French diacritics, kana, the prolonged-sound
/// and iteration marks, CJK ideographs and hyphen
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZäöüßÄÖÜàâæçéèêëïîôœùûÿÀÂÆÇÉÈÊËÏÎÔŒÙÛŸぁ-んァ-ヶー々一-龯-]+$")
        .expect("valid regex")
});

/// Extract candidate words from a model reply, one per line.
///
/// Markers and punctuation are stripped; lines that still contain anything
/// but word characters (including inner spaces) are dropped.
pub fn parse_word_list(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line = LIST_MARKER.replace(line, "");
            PUNCTUATION.replace_all(&line, "").trim().to_lowercase()
        })
        .filter(|word| word.chars().count() > 1 && WORD.is_match(word))
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

pub struct RecommendationEngine {
    client: Arc<dyn CompletionClient>,
    known_words: KnownWordsAggregator,
    progress: Arc<dyn ProgressStore>,
    options: CompletionOptions,
}

impl RecommendationEngine {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        known_words: KnownWordsAggregator,
        progress: Arc<dyn ProgressStore>,
        config: &AiConfig,
    ) -> Self {
        Self {
            client,
            known_words,
            progress,
            options: config.recommendation_options(),
        }
    }

    /// Up to `count` new words suited to the learner's progress.
    /// Falls back to the catalog's default words on any failure.
    pub async fn recommend_words(&self, language: &str, count: usize) -> Vec<String> {
        let language = Language::normalize(language);
        self.run(language, None, count).await
    }

    /// Up to `count` new words matching a free-text request
    pub async fn recommend_words_with_prompt(
        &self,
        language: &str,
        custom_prompt: &str,
        count: usize,
    ) -> Vec<String> {
        let language = Language::normalize(language);
        self.run(language, Some(custom_prompt), count).await
    }

    async fn run(&self, language: Language, custom_prompt: Option<&str>, count: usize) -> Vec<String> {
        if count == 0 {
            return Vec::new();
        }

        match self.try_recommend(language, custom_prompt, count).await {
            Ok(words) => {
                tracing::info!("Recommended {} {} words", words.len(), language);
                words
            }
            Err(e) => {
                tracing::warn!("Recommendation failed for {}, using default words: {}", language, e);
                language.default_words(count)
            }
        }
    }

    async fn try_recommend(
        &self,
        language: Language,
        custom_prompt: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>, GenerationError> {
        let known = self.known_words.known_words(language)?;

        let user_prompt = match custom_prompt {
            Some(text) => prompts::custom_prompt(language, text, &known, count),
            None => {
                let stats = self.progress.stats(language)?;
                prompts::recommendation_prompt(language, &known, &stats, count)
            }
        };

        let request = CompletionRequest {
            system_message: prompts::recommendation_system_message(language),
            user_prompt,
            options: self.options,
        };
        let content = complete_bounded(self.client.as_ref(), request).await?;

        let parsed = parse_word_list(&content);
        tracing::debug!("Parsed {} candidate words", parsed.len());
        if parsed.is_empty() {
            return Err(GenerationError::NoWords);
        }

        Ok(parsed
            .into_iter()
            .filter(|word| !known.contains(word))
            .take(count)
            .collect())
    }
}
