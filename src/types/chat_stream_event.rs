use serde::{Deserialize, Serialize};

/// One event from the `/ollama` server-sent-event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStreamEvent {
    /// A fragment of the reply text.
    Chunk(String),

    /// The `[DONE]` marker terminating the stream.
    Done,
}

impl ChatStreamEvent {
    /// Returns the chunk text, if this event carries one.
    pub fn chunk(&self) -> Option<&str> {
        match self {
            ChatStreamEvent::Chunk(text) => Some(text),
            ChatStreamEvent::Done => None,
        }
    }
}

/// Wire shape of a single `data:` payload on the `/ollama` stream.
///
/// The backend emits `{"chunk": ...}` while streaming and `{"error": ...}`
/// when the upstream model call fails mid-stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// A fragment of the reply text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk: Option<String>,

    /// Server-reported error text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_payload() {
        let payload: ChunkPayload = serde_json::from_str(r#"{"chunk": "me"}"#).unwrap();
        assert_eq!(payload.chunk.as_deref(), Some("me"));
        assert!(payload.error.is_none());
    }

    #[test]
    fn error_payload() {
        let payload: ChunkPayload =
            serde_json::from_str(r#"{"error": "Streaming failed"}"#).unwrap();
        assert_eq!(payload.error.as_deref(), Some("Streaming failed"));
    }

    #[test]
    fn chunk_accessor() {
        assert_eq!(ChatStreamEvent::Chunk("ow".to_string()).chunk(), Some("ow"));
        assert_eq!(ChatStreamEvent::Done.chunk(), None);
    }
}
