//! Stateful agent: one `invoke` per turn, full history every call.

use std::sync::Arc;

use tracing::debug;

use crate::error::AgentError;
use crate::provider::{CompletionRequest, ModelClient};

use super::conversation::Conversation;

/// Wraps a model client with the conversation it is having.
///
/// Every [`invoke`](Self::invoke) resends the entire history, system prompt
/// included. There is no truncation or summarization; the loop's turn cap is
/// what keeps the history bounded.
pub struct ConversationAgent {
    client: Arc<dyn ModelClient>,
    model: String,
    temperature: f64,
    conversation: Conversation,
}

impl ConversationAgent {
    pub fn new(
        client: Arc<dyn ModelClient>,
        model: impl Into<String>,
        temperature: f64,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
            conversation: Conversation::with_system_prompt(system_prompt),
        }
    }

    /// Append `prompt` as a user message, ask the model, append and return
    /// its reply.
    pub async fn invoke(&mut self, prompt: impl Into<String>) -> Result<String, AgentError> {
        self.conversation.add_user_message(prompt);

        let request = CompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: self.conversation.messages().to_vec(),
        };
        debug!(
            provider = self.client.provider_name(),
            history = request.messages.len(),
            "invoking model"
        );
        let reply = self.client.complete(&request).await?;

        self.conversation.add_assistant_message(reply.clone());
        Ok(reply)
    }

    /// Get the conversation history.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Hand back the history, ending the agent.
    pub fn into_conversation(self) -> Conversation {
        self.conversation
    }
}
