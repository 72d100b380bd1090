//! In-memory conversation state.
//!
//! A conversation is an append-only list of messages plus an optional
//! reply target. Messages are never edited or deleted, and nothing here
//! is persisted: the history lives for the duration of the session only.

use crate::types::{ChatMessage, Sender};

/// Ordered, append-only list of exchanged messages with an optional
/// reply-target slot.
///
/// The reply target is a value copy of a prior message's text, not a
/// reference into the list; it annotates the next outgoing request and is
/// cleared on a successful send or explicit cancellation.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    reply_target: Option<String>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message.
    ///
    /// Whitespace-only input is a no-op and returns `None`; otherwise the
    /// trimmed text is appended and returned.
    pub fn push_user(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(trimmed));
        Some(trimmed.to_string())
    }

    /// Appends a bot message unconditionally.
    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::bot(text));
    }

    /// Sets the reply target to a value copy of the given text.
    pub fn set_reply_target(&mut self, text: impl Into<String>) {
        self.reply_target = Some(text.into());
    }

    /// Sets the reply target to the text of the message at `index`.
    ///
    /// Returns the target text, or `None` when the index is out of range.
    pub fn set_reply_target_to(&mut self, index: usize) -> Option<&str> {
        let text = self.messages.get(index)?.text.clone();
        self.reply_target = Some(text);
        self.reply_target.as_deref()
    }

    /// Clears the reply target.
    pub fn clear_reply_target(&mut self) {
        self.reply_target = None;
    }

    /// Returns the active reply target, if any.
    pub fn reply_target(&self) -> Option<&str> {
        self.reply_target.as_deref()
    }

    /// Returns the messages in insertion order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the number of messages in the conversation.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the conversation has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Discards all messages and the reply target.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.reply_target = None;
    }

    /// Returns the number of messages from the given sender.
    pub fn count_from(&self, sender: Sender) -> usize {
        self.messages
            .iter()
            .filter(|message| message.sender == sender)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_a_no_op() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.push_user(""), None);
        assert_eq!(conversation.push_user("   "), None);
        assert_eq!(conversation.push_user("\t\n"), None);
        assert!(conversation.is_empty());
    }

    #[test]
    fn user_input_is_trimmed() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.push_user("  hello  "), Some("hello".to_string()));
        assert_eq!(conversation.messages()[0], ChatMessage::user("hello"));
    }

    #[test]
    fn messages_keep_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello");
        conversation.push_bot("hi there");
        conversation.push_user("how are you");
        let senders: Vec<Sender> = conversation
            .messages()
            .iter()
            .map(|message| message.sender)
            .collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot, Sender::User]);
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.count_from(Sender::User), 2);
    }

    #[test]
    fn reply_target_is_independent_of_the_list() {
        let mut conversation = Conversation::new();
        conversation.push_user("earlier text");
        conversation.set_reply_target("earlier text");
        assert_eq!(conversation.reply_target(), Some("earlier text"));

        conversation.push_bot("later reply");
        assert_eq!(conversation.reply_target(), Some("earlier text"));

        conversation.clear_reply_target();
        assert_eq!(conversation.reply_target(), None);
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn reply_target_by_index() {
        let mut conversation = Conversation::new();
        conversation.push_user("first");
        conversation.push_bot("second");
        assert_eq!(conversation.set_reply_target_to(1), Some("second"));
        assert_eq!(conversation.set_reply_target_to(5), None);
        // A failed selection leaves the previous target in place.
        assert_eq!(conversation.reply_target(), Some("second"));
    }

    #[test]
    fn clear_discards_messages_and_target() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello");
        conversation.set_reply_target("hello");
        conversation.clear();
        assert!(conversation.is_empty());
        assert_eq!(conversation.reply_target(), None);
    }
}
