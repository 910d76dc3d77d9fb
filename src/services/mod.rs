//! Card generation and word recommendation.
//!
//! Both engines run an internal `Result<_, GenerationError>` pipeline and turn
//! any error into a deterministic fallback, so callers never see a failure.

pub mod completion;
pub mod generate;
pub mod known_words;
pub mod recommend;

pub use completion::{CompletionClient, CompletionError, CompletionOptions, CompletionRequest, HttpCompletionClient};
pub use generate::CardGenerationEngine;
pub use known_words::{KnownWords, KnownWordsAggregator};
pub use recommend::RecommendationEngine;

use crate::db::StoreError;

/// Why an engine fell back
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Could not read learner data: {0}")]
    Store(#[from] StoreError),

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Card payload is not a JSON object")]
    NotAnObject,

    #[error("No usable words in response")]
    NoWords,
}

/// Call the client, giving up once the request's timeout has elapsed
async fn complete_bounded(
    client: &dyn CompletionClient,
    request: CompletionRequest,
) -> Result<String, GenerationError> {
    let limit = request.options.timeout;
    tracing::debug!(
        "Completion request: {} prompt chars, max {} tokens",
        request.user_prompt.chars().count(),
        request.options.max_tokens
    );

    match tokio::time::timeout(limit, client.complete(request)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(CompletionError::Timeout(limit).into()),
    }
}
