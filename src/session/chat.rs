//! Core chat session management.
//!
//! The session owns the conversation state and drives the transport. The
//! calling flow mirrors the web client it replaces: the user's message is
//! appended optimistically before the network call resolves, a successful
//! round trip appends exactly one bot message and clears the reply
//! target, and any failure leaves both untouched.

use futures::StreamExt;

use crate::client::Llama;
use crate::error::{Error, Result};
use crate::observability::{CHAT_SEND_ERRORS, CHAT_SENDS};
use crate::render::Renderer;
use crate::session::config::SessionConfig;
use crate::session::conversation::Conversation;
use crate::types::{ChatRequest, ChatStreamEvent, Sender, StreamChatRequest};

/// Message for transport-level chat failures.
pub const CONNECT_FAILED: &str = "Failed to connect to server.";

/// Fallback message for chat failures without server-supplied text.
pub const RESPONSE_FALLBACK: &str = "Error getting response";

/// A chat session that manages conversation state and API interactions.
pub struct ChatSession {
    client: Llama,
    config: SessionConfig,
    conversation: Conversation,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The number of messages in the conversation.
    pub message_count: usize,
    /// How many of those came from the user.
    pub user_messages: usize,
    /// How many of those came from the bot.
    pub bot_messages: usize,
    /// Whether a reply target is active.
    pub reply_target_active: bool,
    /// Whether sends go to the streaming responder.
    pub streaming: bool,
    /// The model used by the streaming responder.
    pub ollama_model: String,
    /// The base URL requests are issued against.
    pub base_url: String,
}

impl ChatSession {
    /// Creates a new chat session with the given client and configuration.
    pub fn new(client: Llama, config: SessionConfig) -> Self {
        Self::with_conversation(client, config, Conversation::new())
    }

    /// Creates a chat session resuming an existing conversation.
    pub fn with_conversation(
        client: Llama,
        config: SessionConfig,
        conversation: Conversation,
    ) -> Self {
        Self {
            client,
            config,
            conversation,
        }
    }

    /// Returns the client used by the session.
    pub fn client(&self) -> &Llama {
        &self.client
    }

    /// Returns the conversation state.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Sends a user message through `POST /chat` and returns the reply.
    ///
    /// Whitespace-only input is a no-op returning `Ok(None)`. Otherwise
    /// the trimmed message is appended to the conversation *before* the
    /// request is issued. On success the reply is appended as a bot
    /// message and the reply target is cleared; on failure the
    /// conversation keeps only the user's message and the reply target is
    /// left as it was.
    pub async fn send(&mut self, input: &str) -> Result<Option<String>> {
        let Some(text) = self.conversation.push_user(input) else {
            return Ok(None);
        };
        let request =
            ChatRequest::new(text).with_reply_to(self.conversation.reply_target().map(String::from));

        CHAT_SENDS.click();
        let reply = self.client.chat(&request).await.inspect_err(|_| {
            CHAT_SEND_ERRORS.click();
        })?;

        self.conversation.push_bot(reply.clone());
        self.conversation.clear_reply_target();
        Ok(Some(reply))
    }

    /// Sends a user message through the streaming responder, rendering
    /// chunks as they arrive, and returns the accumulated reply.
    ///
    /// The streaming endpoint carries no reply annotation, so the reply
    /// target is neither consumed nor cleared here. Partial output that
    /// arrived before a mid-stream failure stays in the conversation; a
    /// stream that fails before producing anything appends no bot message.
    pub async fn send_streaming(
        &mut self,
        input: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<Option<String>> {
        let Some(text) = self.conversation.push_user(input) else {
            return Ok(None);
        };
        let request = StreamChatRequest::new(self.config.ollama_model.clone(), text);

        CHAT_SENDS.click();
        let mut stream = self.client.chat_stream(&request).await.inspect_err(|_| {
            CHAT_SEND_ERRORS.click();
        })?;

        let mut accumulated = String::new();
        let mut started = false;
        let outcome = loop {
            match stream.next().await {
                Some(Ok(ChatStreamEvent::Chunk(chunk))) => {
                    if !started {
                        renderer.begin_reply();
                        started = true;
                    }
                    renderer.print_chunk(&chunk);
                    accumulated.push_str(&chunk);
                }
                Some(Ok(ChatStreamEvent::Done)) | None => break Ok(()),
                Some(Err(err)) => {
                    CHAT_SEND_ERRORS.click();
                    break Err(err);
                }
            }
        };
        if started {
            renderer.finish_reply();
        }

        if !accumulated.is_empty() {
            self.conversation.push_bot(accumulated.clone());
        }
        outcome.map(|_| Some(accumulated))
    }

    /// Selects the message at `index` as the reply target.
    pub fn reply_to(&mut self, index: usize) -> Result<&str> {
        self.conversation.set_reply_target_to(index).ok_or_else(|| {
            Error::validation(
                format!("no message at index {index}"),
                Some("index".to_string()),
            )
        })
    }

    /// Clears the reply target.
    pub fn cancel_reply(&mut self) {
        self.conversation.clear_reply_target();
    }

    /// Returns the active reply target, if any.
    pub fn reply_target(&self) -> Option<&str> {
        self.conversation.reply_target()
    }

    /// Clears the local conversation.
    pub fn clear_local(&mut self) {
        self.conversation.clear();
    }

    /// Clears both the server-side history and the local conversation.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.client.clear_history().await?;
        self.conversation.clear();
        Ok(())
    }

    /// Switches sends between the canned and streaming responders.
    pub fn set_streaming(&mut self, streaming: bool) {
        self.config.streaming = streaming;
    }

    /// Returns true if sends go to the streaming responder.
    pub fn streaming(&self) -> bool {
        self.config.streaming
    }

    /// Changes the model used by the streaming responder.
    pub fn set_ollama_model(&mut self, model: impl Into<String>) {
        self.config.ollama_model = model.into();
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            message_count: self.conversation.len(),
            user_messages: self.conversation.count_from(Sender::User),
            bot_messages: self.conversation.count_from(Sender::Bot),
            reply_target_active: self.conversation.reply_target().is_some(),
            streaming: self.config.streaming,
            ollama_model: self.config.ollama_model.clone(),
            base_url: self.client.base_url().to_string(),
        }
    }
}

/// Maps a chat error to the message shown to the user.
///
/// Transport failures (connection refused, timeouts, malformed bodies)
/// get the generic connectivity message; server-reported error text is
/// surfaced verbatim; anything else falls back to the generic response
/// error.
pub fn chat_error_message(err: &Error) -> String {
    if err.is_transport() {
        return CONNECT_FAILED.to_string();
    }
    err.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| RESPONSE_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ChatSession {
        let client = Llama::new(Some("http://127.0.0.1:5000/".to_string())).unwrap();
        ChatSession::new(client, SessionConfig::new())
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let mut session = session();
        assert_eq!(session.send("   ").await.unwrap(), None);
        assert!(session.conversation().is_empty());
    }

    #[test]
    fn reply_to_out_of_range_is_a_validation_error() {
        let mut session = session();
        let err = session.reply_to(3).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.reply_target(), None);
    }

    #[test]
    fn stats_snapshot() {
        let mut session = session();
        session.conversation.push_user("hello");
        session.conversation.push_bot("hi there");
        session.conversation.set_reply_target("hello");
        let stats = session.stats();
        assert_eq!(stats.message_count, 2);
        assert_eq!(stats.user_messages, 1);
        assert_eq!(stats.bot_messages, 1);
        assert!(stats.reply_target_active);
        assert!(!stats.streaming);
        assert_eq!(stats.base_url, "http://127.0.0.1:5000/");
    }

    #[test]
    fn chat_error_messages() {
        assert_eq!(
            chat_error_message(&Error::connection("refused", None)),
            CONNECT_FAILED
        );
        assert_eq!(
            chat_error_message(&Error::serialization("bad body", None)),
            CONNECT_FAILED
        );
        assert_eq!(
            chat_error_message(&Error::bad_request("No message provided", None)),
            "No message provided"
        );
        assert_eq!(chat_error_message(&Error::api(500, "")), RESPONSE_FALLBACK);
    }
}
