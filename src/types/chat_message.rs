use serde::{Deserialize, Serialize};

/// Who produced a message in the conversation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// A message typed by the user.
    User,

    /// A reply produced by the backend.
    Bot,
}

/// A single message exchanged in a chat conversation.
///
/// Messages are immutable once created: there is no edit or delete
/// operation anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced the message.
    pub sender: Sender,

    /// The message text. Non-empty by construction for user messages.
    pub text: String,
}

impl ChatMessage {
    /// Create a new `ChatMessage` with the given sender and text.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    /// Create a new user `ChatMessage`.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create a new bot `ChatMessage`.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// Returns true if this message came from the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn user_message_serializes_lowercase() {
        let message = ChatMessage::user("hello");
        let json = to_value(&message).unwrap();
        assert_eq!(
            json,
            json!({
                "sender": "user",
                "text": "hello"
            })
        );
    }

    #[test]
    fn bot_message_round_trip() {
        let message = ChatMessage::bot("hi there");
        let json = serde_json::to_string(&message).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
        assert!(!back.is_user());
    }
}
