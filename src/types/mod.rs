// Public modules
pub mod auth_response;
pub mod chat_message;
pub mod chat_request;
pub mod chat_response;
pub mod chat_stream_event;
pub mod clear_history_response;
pub mod credentials;
pub mod stream_chat_request;

// Re-exports
pub use auth_response::AuthResponse;
pub use chat_message::{ChatMessage, Sender};
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use chat_stream_event::{ChatStreamEvent, ChunkPayload};
pub use clear_history_response::ClearHistoryResponse;
pub use credentials::Credentials;
pub use stream_chat_request::StreamChatRequest;
