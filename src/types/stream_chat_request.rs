use serde::{Deserialize, Serialize};

/// Request body for `POST /ollama`, the streaming chat endpoint.
///
/// Unlike `POST /chat`, the streaming endpoint carries no reply
/// annotation; the model name selects which backend model answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChatRequest {
    /// The backend model that should answer.
    pub model: String,

    /// The outgoing message text, already trimmed and non-empty.
    pub message: String,
}

impl StreamChatRequest {
    /// Create a new `StreamChatRequest`.
    pub fn new(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn stream_request_wire_shape() {
        let request = StreamChatRequest::new("llama3", "hello");
        let json = to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "model": "llama3",
                "message": "hello"
            })
        );
    }
}
