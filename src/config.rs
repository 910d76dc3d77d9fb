//! Application configuration.
//!
//! Completion API settings are read once at startup into [`AiConfig`] and
//! handed to the engines; nothing reads the environment after that.

use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::services::completion::CompletionOptions;

// ==================== AI Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
  ai: Option<AiSection>,
}

#[derive(Debug, Default, Deserialize)]
struct AiSection {
  endpoint: Option<String>,
  api_key: Option<String>,
  model: Option<String>,
  temperature: Option<f32>,
  max_tokens: Option<u32>,
  timeout_secs: Option<u64>,
}

/// Default base URL of the OpenAI-compatible API
pub const DEFAULT_AI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_AI_MODEL: &str = "gpt-4-turbo-preview";

/// Default sampling temperature for card generation
pub const DEFAULT_CARD_TEMPERATURE: f32 = 0.7;

/// Default token budget for card generation
pub const DEFAULT_CARD_MAX_TOKENS: u32 = 2000;

/// Default bound on a single completion call
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Recommendation calls sample a little hotter and need far fewer tokens
pub const RECOMMENDATION_TEMPERATURE: f32 = 0.8;
pub const RECOMMENDATION_MAX_TOKENS: u32 = 500;

/// Placeholder key shipped in example .env files
const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Settings for the external completion API
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
  pub endpoint: String,
  pub api_key: String,
  pub model: String,
  pub temperature: f32,
  pub max_tokens: u32,
  pub timeout: Duration,
}

impl Default for AiConfig {
  fn default() -> Self {
    Self {
      endpoint: DEFAULT_AI_ENDPOINT.to_string(),
      api_key: String::new(),
      model: DEFAULT_AI_MODEL.to_string(),
      temperature: DEFAULT_CARD_TEMPERATURE,
      max_tokens: DEFAULT_CARD_MAX_TOKENS,
      timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
    }
  }
}

impl AiConfig {
  /// Load with priority: config.toml > environment (.env) > default
  pub fn load() -> Self {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file_section = std::fs::read_to_string("config.toml")
      .ok()
      .and_then(|contents| match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => config.ai,
        Err(e) => {
          tracing::warn!("Ignoring invalid config.toml: {}", e);
          None
        }
      })
      .unwrap_or_default();

    let config = Self::resolve(file_section, |key| std::env::var(key).ok());

    if !config.has_api_key() {
      tracing::warn!("No valid AI API key configured; card generation will use fallback content");
    }
    tracing::info!("AI endpoint: {} (model {})", config.endpoint, config.model);
    config
  }

  fn resolve(file: AiSection, env: impl Fn(&str) -> Option<String>) -> Self {
    let defaults = Self::default();

    Self {
      endpoint: file
        .endpoint
        .or_else(|| env("AI_API_ENDPOINT"))
        .map(|e| e.trim_end_matches('/').to_string())
        .unwrap_or(defaults.endpoint),
      api_key: file.api_key.or_else(|| env("AI_API_KEY")).unwrap_or_default(),
      model: file.model.or_else(|| env("AI_MODEL")).unwrap_or(defaults.model),
      temperature: file
        .temperature
        .or_else(|| parse_env(&env, "AI_TEMPERATURE"))
        .unwrap_or(defaults.temperature),
      max_tokens: file
        .max_tokens
        .or_else(|| parse_env(&env, "AI_MAX_TOKENS"))
        .unwrap_or(defaults.max_tokens),
      timeout: file
        .timeout_secs
        .or_else(|| parse_env(&env, "AI_TIMEOUT_SECS"))
        .map(Duration::from_secs)
        .unwrap_or(defaults.timeout),
    }
  }

  pub fn has_api_key(&self) -> bool {
    !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
  }

  /// Options for single-card generation calls
  pub fn card_options(&self) -> CompletionOptions {
    CompletionOptions {
      temperature: self.temperature,
      max_tokens: self.max_tokens,
      timeout: self.timeout,
    }
  }

  /// Options for word recommendation calls
  pub fn recommendation_options(&self) -> CompletionOptions {
    CompletionOptions {
      temperature: RECOMMENDATION_TEMPERATURE,
      max_tokens: RECOMMENDATION_MAX_TOKENS,
      timeout: self.timeout,
    }
  }
}

fn parse_env<T: FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
  env(key).and_then(|v| v.trim().parse().ok())
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Server port (PORT env var or default)
pub fn server_port() -> u16 {
  std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse().ok())
    .unwrap_or(DEFAULT_SERVER_PORT)
}

/// Get the full server bind address
pub fn server_bind_addr() -> String {
  format!("{}:{}", SERVER_ADDR, server_port())
}

// ==================== Recommendation Limits ====================

/// Known words listed in a recommendation prompt (most recent first kept)
pub const RECENT_KNOWN_WORDS_LIMIT: usize = 50;

/// Words requested when the client gives no count
pub const DEFAULT_RECOMMEND_COUNT: usize = 10;

/// Upper bound on cards generated by one batch request
pub const MAX_BATCH_CARDS: usize = 20;
