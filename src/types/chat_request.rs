use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
///
/// The `reply_to` field is present on the wire iff a reply target was
/// active when the message was sent; the backend treats its presence as
/// the annotation, so `None` must serialize to an absent field rather
/// than `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The outgoing message text, already trimmed and non-empty.
    pub message: String,

    /// The text of the prior message being replied to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl ChatRequest {
    /// Create a new `ChatRequest` with no reply annotation.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reply_to: None,
        }
    }

    /// Set the reply-to annotation.
    pub fn with_reply_to(mut self, reply_to: Option<String>) -> Self {
        self.reply_to = reply_to;
        self
    }
}
