//! Conversation message history.

use crate::types::{Message, Role};

/// Ordered, append-only message history for one question.
///
/// Insertion order is the prompt order sent to the model. Nothing is ever
/// removed or rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a history seeded with a system prompt. An empty prompt seeds
    /// nothing.
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        let mut conversation = Self::new();
        if !prompt.is_empty() {
            conversation.messages.push(Message::system(prompt));
        }
        conversation
    }

    /// Add a user message.
    pub fn add_user_message(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// Add an assistant message.
    pub fn add_assistant_message(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    /// Get all messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent assistant reply, if any.
    pub fn last_assistant(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role() == Role::Assistant)
    }

    /// Number of messages with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role() == role).count()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_is_seeded_once() {
        let conversation = Conversation::with_system_prompt("be brief");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role(), Role::System);
    }

    #[test]
    fn empty_system_prompt_seeds_nothing() {
        assert!(Conversation::with_system_prompt("").is_empty());
    }

    #[test]
    fn appends_preserve_order() {
        let mut conversation = Conversation::with_system_prompt("sys");
        conversation.add_user_message("q");
        conversation.add_assistant_message("a");

        let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(conversation.last_assistant().unwrap().content(), "a");
        assert_eq!(conversation.count_role(Role::User), 1);
    }
}
