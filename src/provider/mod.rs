//! Model client trait and implementations.

pub mod http;
pub mod openai;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::types::Message;

pub use openai::OpenAiClient;

/// A request sent to a model client: the full history, every time.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<Message>,
}

/// Core trait implemented by every model backend.
///
/// Given the whole ordered conversation, return the text of one assistant
/// message.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Backend name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// Produce one assistant message for the conversation.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AgentError>;
}
