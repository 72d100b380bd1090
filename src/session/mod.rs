//! Session layer for the terminal chat client.
//!
//! This module ties the typed client to the interactive application:
//!
//! - [`conversation`]: append-only message list and reply-target state
//! - [`chat`]: the chat session driving sends and the failure rules
//! - [`auth`]: login and registration flows with token persistence
//! - [`store`]: the file-backed session token store
//! - [`commands`]: slash command parsing
//! - [`config`]: CLI argument parsing and resolved configuration

mod auth;
mod chat;
mod commands;
mod config;
mod conversation;
mod store;

pub use auth::{
    LOGIN_FALLBACK, PASSWORD_MISMATCH, SIGNUP_FALLBACK, TRY_AGAIN_LATER, auth_error_message,
    login, logout, signup,
};
pub use chat::{CONNECT_FAILED, ChatSession, RESPONSE_FALLBACK, SessionStats, chat_error_message};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{SessionArgs, SessionConfig};
pub use conversation::Conversation;
pub use store::TokenStore;
