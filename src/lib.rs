// Public modules
pub mod client;
pub mod error;
pub mod observability;
pub mod render;
pub mod session;
pub mod types;

// Re-exports
pub use client::Llama;
pub use error::{Error, Result};
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
