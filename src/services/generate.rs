//! Card generation from model output, with a placeholder card on failure

use std::sync::{Arc, LazyLock};

use futures::future::join_all;
use regex::Regex;
use serde_json::{Map, Value};

use crate::config::AiConfig;
use crate::db::{CollectionStore, StoreError, StoreResult};
use crate::domain::{Card, Collection, Definition, Example, Language};
use crate::prompts;

use super::completion::{CompletionClient, CompletionOptions, CompletionRequest};
use super::{complete_bounded, GenerationError};

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*|```\s*").expect("valid regex"));

/// Remove markdown code fences the model may wrap its JSON in
pub fn strip_code_fences(content: &str) -> String {
    CODE_FENCE.replace_all(content, "").trim().to_string()
}

pub struct CardGenerationEngine {
    client: Arc<dyn CompletionClient>,
    options: CompletionOptions,
}

impl CardGenerationEngine {
    pub fn new(client: Arc<dyn CompletionClient>, config: &AiConfig) -> Self {
        Self {
            client,
            options: config.card_options(),
        }
    }

    /// Generate a card for `word`. Never fails: any error yields [`fallback_card`].
    pub async fn generate_card(&self, word: &str, language: &str) -> Card {
        let language = Language::normalize(language);
        match self.try_generate(word, language).await {
            Ok(card) => {
                tracing::info!("Generated card {} for '{}'", card.id, word);
                card
            }
            Err(e) => {
                tracing::warn!("Card generation failed for '{}', using fallback card: {}", word, e);
                fallback_card(word, language)
            }
        }
    }

    /// Generate cards concurrently, keeping the input order
    pub async fn generate_cards(&self, words: &[String], language: &str) -> Vec<Card> {
        join_all(words.iter().map(|word| self.generate_card(word, language))).await
    }

    /// Regenerate one card of a stored collection in place.
    ///
    /// The collection and card are checked before the model is called. The
    /// new content is spliced into the collection as stored after the call,
    /// so writes made meanwhile are kept. The card keeps its id and status.
    pub async fn regenerate_card(
        &self,
        store: &dyn CollectionStore,
        collection_id: &str,
        card_id: &str,
        word: &str,
        language: &str,
    ) -> StoreResult<Collection> {
        let collection = store
            .get_collection(collection_id)?
            .ok_or_else(|| StoreError::CollectionNotFound(collection_id.to_string()))?;
        if collection.card_index(card_id).is_none() {
            return Err(StoreError::CardNotFound(card_id.to_string()));
        }

        let fresh = self.generate_card(word, language).await;
        store.replace_card(collection_id, card_id, fresh)
    }

    async fn try_generate(&self, word: &str, language: Language) -> Result<Card, GenerationError> {
        let request = CompletionRequest {
            system_message: prompts::card_system_message(language),
            user_prompt: prompts::card_prompt(language, word),
            options: self.options,
        };
        let content = complete_bounded(self.client.as_ref(), request).await?;

        let payload: Value = serde_json::from_str(&strip_code_fences(&content))?;
        card_from_payload(&payload, word, language)
    }
}

/// Coerce the model's JSON into a card.
///
/// Only a non-object payload is an error; every field falls back to a default.
pub fn card_from_payload(payload: &Value, word: &str, language: Language) -> Result<Card, GenerationError> {
    let data = payload.as_object().ok_or(GenerationError::NotAnObject)?;

    let word = text(data, "word").unwrap_or_else(|| word.to_string());
    let mut card = Card::new(word, language);
    card.phonetic = text(data, "phonetic").unwrap_or_default();
    card.level = text(data, "level").unwrap_or_else(|| language.default_level().to_string());

    card.definitions = data
        .get("definitions")
        .and_then(Value::as_array)
        .map(|defs| defs.iter().filter_map(definition_from_value).collect())
        .unwrap_or_default();

    // Definition examples first, then standalone ones
    let standalone = data
        .get("examples")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(example_from_value);
    card.examples = card
        .definitions
        .iter()
        .filter_map(|d| d.example.clone())
        .chain(standalone)
        .collect();

    card.conjugation = text(data, "conjugation");
    card.inflection = text(data, "inflection");
    card.declension = text(data, "declension");
    card.etymology = text(data, "etymology").unwrap_or_default();
    card.tips = text(data, "tips").unwrap_or_default();

    Ok(card)
}

fn definition_from_value(value: &Value) -> Option<Definition> {
    let data = value.as_object()?;
    Some(Definition {
        pos: text(data, "pos").unwrap_or_default(),
        meaning: text(data, "meaning").unwrap_or_default(),
        example: data.get("example").and_then(example_from_value),
    })
}

/// An example counts only with both a sentence and a translation
fn example_from_value(value: &Value) -> Option<Example> {
    let data = value.as_object()?;
    Some(Example {
        sentence: text(data, "sentence")?,
        translation: text(data, "translation")?,
    })
}

/// Non-empty trimmed string for `key`; numbers and booleans are stringified
fn text(data: &Map<String, Value>, key: &str) -> Option<String> {
    let s = match data.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Placeholder card used when generation fails
pub fn fallback_card(word: &str, language: Language) -> Card {
    let mut card = Card::new(word.to_string(), language);
    card.phonetic = "/".to_string();
    card.level = language.default_level().to_string();
    card.definitions = vec![
        Definition {
            pos: "n.".to_string(),
            meaning: format!("{} 的释义（AI生成失败，请重试）", word),
            example: None,
        },
        Definition {
            pos: "v.".to_string(),
            meaning: "暂无更多释义".to_string(),
            example: None,
        },
    ];
    card.examples = vec![
        Example {
            sentence: format!("Example with {}.", word),
            translation: format!("包含 {} 的例句（AI生成失败，请重试）", word),
        },
        Example {
            sentence: format!("Another example with {}.", word),
            translation: "暂无更多例句".to_string(),
        },
    ];
    card.etymology = format!("{} 的词源信息暂时无法获取", word);
    card.tips = format!("学习 {} 时请注意：AI服务暂时不可用，建议稍后重试以获取完整的学习内容。", word);
    card
}
