//! Conversation state and the agent that drives it one turn at a time.

#[allow(clippy::module_inception)]
pub mod agent;
pub mod conversation;

pub use agent::ConversationAgent;
pub use conversation::Conversation;
