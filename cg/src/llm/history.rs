//! Conversation history
//!
//! An ordered list of messages that grows as a sample talks to the model.
//! Each sample owns its own history; nothing is shared.

use tracing::debug;

use super::{ContentBlock, Message};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatHistory {
    messages: Vec<Message>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History starting with a system message
    pub fn with_system(text: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.add_system(text);
        history
    }

    pub fn add_system(&mut self, text: impl Into<String>) {
        self.add_message(Message::system(text));
    }

    pub fn add_user(&mut self, text: impl Into<String>) {
        self.add_message(Message::user(text));
    }

    pub fn add_user_blocks(&mut self, blocks: Vec<ContentBlock>) {
        self.add_message(Message::user_blocks(blocks));
    }

    pub fn add_assistant(&mut self, text: impl Into<String>) {
        self.add_message(Message::assistant(text));
    }

    pub fn add_message(&mut self, message: Message) {
        debug!(role = ?message.role, len = %self.messages.len(), "ChatHistory::add_message: called");
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl From<ChatHistory> for Vec<Message> {
    fn from(history: ChatHistory) -> Self {
        history.messages
    }
}
