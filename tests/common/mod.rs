//! Shared setup for the HTTP tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;

use lingomem::config::AiConfig;
use lingomem::db::{open_in_memory, SqliteStore};
use lingomem::handlers;
use lingomem::services::{CompletionClient, CompletionError, CompletionRequest};
use lingomem::state::AppState;

/// Model stand-in: answers word-list requests with `words` and card requests
/// with a fixed card body. `None` makes every call fail.
pub struct StubModel {
  words: Option<String>,
  calls: AtomicUsize,
}

impl StubModel {
  pub fn answering(words: &[&str]) -> Self {
    Self {
      words: Some(words.join("\n")),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn offline() -> Self {
    Self {
      words: None,
      calls: AtomicUsize::new(0),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CompletionClient for StubModel {
  async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let Some(words) = &self.words else {
      return Err(CompletionError::Transport("connection refused".to_string()));
    };

    if request.system_message.contains("learning consultant") {
      return Ok(words.clone());
    }

    let card = json!({
      "phonetic": "/stub/",
      "level": "B1",
      "definitions": [
        {
          "pos": "n.",
          "meaning": "stub meaning",
          "example": { "sentence": "A stub sentence.", "translation": "stub translation" }
        }
      ],
      "etymology": "stub etymology",
      "tips": "stub tips"
    });
    Ok(format!("```json\n{}\n```", card))
  }
}

pub struct TestApp {
  pub server: TestServer,
  pub model: Arc<StubModel>,
}

pub fn test_app(model: StubModel) -> TestApp {
  let pool = open_in_memory().expect("in-memory database");
  let model = Arc::new(model);
  let config = AiConfig {
    api_key: "sk-test".to_string(),
    ..AiConfig::default()
  };

  let state = AppState::with_sqlite(SqliteStore::new(pool), model.clone(), &config);
  let server = TestServer::new(handlers::router(state)).expect("test server");

  TestApp { server, model }
}
