//! Test doubles for the completion client and the stores.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::AiConfig;
use crate::db::{open_in_memory, CollectionStore, ProgressStore, SqliteStore, StoreError, StoreResult};
use crate::domain::{Card, CardStatus, Collection, Language, LanguageProgress, LearningStats};
use crate::services::completion::{CompletionClient, CompletionError, CompletionRequest};

type Reply = Result<String, CompletionError>;

/// Completion client that replays queued replies, then answers with `fallback`
pub struct ScriptedClient {
    queue: Mutex<VecDeque<Reply>>,
    fallback: Box<dyn Fn() -> Reply + Send + Sync>,
    delay: Option<Duration>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Reply>, fallback: impl Fn() -> Reply + Send + Sync + 'static) -> Self {
        Self {
            queue: Mutex::new(replies.into()),
            fallback: Box::new(fallback),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every call with `text`
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(Vec::new(), move || Ok(text.clone()))
    }

    /// Answers calls in order; later calls fail with a transport error
    pub fn sequence(replies: Vec<Reply>) -> Self {
        Self::new(replies, || Err(CompletionError::Transport("script exhausted".into())))
    }

    /// Every call fails with a transport error
    pub fn unreachable() -> Self {
        Self::new(Vec::new(), || Err(CompletionError::Transport("connection refused".into())))
    }

    /// Sleeps before answering
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.queue.lock().unwrap().pop_front();
        next.unwrap_or_else(|| (self.fallback)())
    }
}

/// Store whose every operation fails
pub struct FailingStore;

impl CollectionStore for FailingStore {
    fn list_collections(&self) -> StoreResult<Vec<Collection>> {
        Err(StoreError::Lock)
    }
    fn get_collection(&self, _id: &str) -> StoreResult<Option<Collection>> {
        Err(StoreError::Lock)
    }
    fn create_collection(&self, _language: Language, _cards: Vec<Card>) -> StoreResult<Collection> {
        Err(StoreError::Lock)
    }
    fn update_collection(&self, _collection: Collection) -> StoreResult<Collection> {
        Err(StoreError::Lock)
    }
    fn delete_collection(&self, _id: &str) -> StoreResult<bool> {
        Err(StoreError::Lock)
    }
    fn get_or_create_collection(&self, _language: Language) -> StoreResult<Collection> {
        Err(StoreError::Lock)
    }
    fn add_card(&self, _collection_id: &str, _card: Card) -> StoreResult<Collection> {
        Err(StoreError::Lock)
    }
    fn replace_card(&self, _collection_id: &str, _card_id: &str, _fresh: Card) -> StoreResult<Collection> {
        Err(StoreError::Lock)
    }
    fn update_card_status(
        &self,
        _collection_id: &str,
        _card_id: &str,
        _status: CardStatus,
    ) -> StoreResult<Collection> {
        Err(StoreError::Lock)
    }
}

impl ProgressStore for FailingStore {
    fn learned_words(&self, _language: Language) -> StoreResult<Vec<String>> {
        Err(StoreError::Lock)
    }
    fn stats(&self, _language: Language) -> StoreResult<LearningStats> {
        Err(StoreError::Lock)
    }
    fn record_learned_words(&self, _language: Language, _words: &[String]) -> StoreResult<usize> {
        Err(StoreError::Lock)
    }
    fn progress_overview(&self) -> StoreResult<Vec<(Language, LanguageProgress)>> {
        Err(StoreError::Lock)
    }
}

/// In-memory SQLite store
pub fn memory_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::new(open_in_memory().expect("in-memory database")))
}

/// Config with a short timeout for engine tests
pub fn test_config() -> AiConfig {
    AiConfig {
        api_key: "sk-test".to_string(),
        timeout: Duration::from_millis(200),
        ..AiConfig::default()
    }
}
