//! Article generation over an OpenAI-compatible chat-completions API.
//!
//! [`ArticleWriter`] is the seam the HTTP layer depends on;
//! [`OpenAiWriter`] is the production implementation.

pub mod client;
pub mod error;
pub mod prompt;

use async_trait::async_trait;

pub use client::{OpenAiWriter, WriterConfig};
pub use error::GenerationError;

/// Produces article text for a topic.
///
/// Implementations make a single attempt; retry policy belongs to the caller.
#[async_trait]
pub trait ArticleWriter: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<String, GenerationError>;
}
