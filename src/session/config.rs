//! Configuration types for the terminal chat client.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! configuration controlling session behavior.

use std::env;
use std::path::PathBuf;

use arrrg_derive::CommandLine;

/// Default model for the streaming `/ollama` responder.
const DEFAULT_OLLAMA_MODEL: &str = "llama3";

/// Command-line arguments for the llamachat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct SessionArgs {
    /// Base URL of the chat backend.
    #[arrrg(optional, "Base URL of the chat backend (default: http://127.0.0.1:5000/)", "URL")]
    pub base_url: Option<String>,

    /// Path of the token file.
    #[arrrg(optional, "Path of the session token file", "PATH")]
    pub token_file: Option<String>,

    /// Model used by the streaming responder.
    #[arrrg(optional, "Model for streaming chat (default: llama3)", "MODEL")]
    pub model: Option<String>,

    /// Start in streaming mode.
    #[arrrg(flag, "Use the streaming responder by default")]
    pub stream: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments and environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL override for the backend; `None` defers to the client's
    /// own environment/default resolution.
    pub base_url: Option<String>,

    /// Where the session token is stored.
    pub token_file: PathBuf,

    /// Model used by the streaming responder.
    pub ollama_model: String,

    /// Whether chat sends go to the streaming responder.
    pub streaming: bool,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl SessionConfig {
    /// Creates a new SessionConfig with default values.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token_file: default_token_file(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            streaming: false,
            use_color: true,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the token file path.
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    /// Sets the streaming model.
    pub fn with_ollama_model(mut self, model: impl Into<String>) -> Self {
        self.ollama_model = model.into();
        self
    }

    /// Enables or disables streaming mode.
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SessionArgs> for SessionConfig {
    fn from(args: SessionArgs) -> Self {
        let defaults = SessionConfig::new();
        SessionConfig {
            base_url: args.base_url,
            token_file: args.token_file.map(PathBuf::from).unwrap_or(defaults.token_file),
            ollama_model: args.model.unwrap_or(defaults.ollama_model),
            streaming: args.stream,
            use_color: !args.no_color,
        }
    }
}

/// Resolves the default token file path.
///
/// `LLAMACHAT_TOKEN_FILE` wins when set; otherwise the token lives under
/// `$HOME/.llamachat/token`, falling back to the working directory when
/// no home directory is available.
fn default_token_file() -> PathBuf {
    if let Ok(path) = env::var("LLAMACHAT_TOKEN_FILE") {
        return PathBuf::from(path);
    }
    match env::var("HOME") {
        Ok(home) => {
            let mut path = PathBuf::from(home);
            path.push(".llamachat");
            path.push("token");
            path
        }
        Err(_) => PathBuf::from(".llamachat-token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::new();
        assert!(config.base_url.is_none());
        assert_eq!(config.ollama_model, "llama3");
        assert!(!config.streaming);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = SessionArgs::default();
        let config = SessionConfig::from(args);
        assert!(config.base_url.is_none());
        assert_eq!(config.ollama_model, "llama3");
        assert!(!config.streaming);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = SessionArgs {
            base_url: Some("http://chat.example.com/".to_string()),
            token_file: Some("/tmp/token".to_string()),
            model: Some("llama3.1".to_string()),
            stream: true,
            no_color: true,
        };
        let config = SessionConfig::from(args);
        assert_eq!(config.base_url.as_deref(), Some("http://chat.example.com/"));
        assert_eq!(config.token_file, PathBuf::from("/tmp/token"));
        assert_eq!(config.ollama_model, "llama3.1");
        assert!(config.streaming);
        assert!(!config.use_color);
    }

    #[test]
    fn config_builder_pattern() {
        let config = SessionConfig::new()
            .with_base_url("http://chat.example.com/")
            .with_token_file("/tmp/token")
            .with_ollama_model("llama3.1")
            .with_streaming(true)
            .without_color();

        assert_eq!(config.base_url.as_deref(), Some("http://chat.example.com/"));
        assert_eq!(config.token_file, PathBuf::from("/tmp/token"));
        assert_eq!(config.ollama_model, "llama3.1");
        assert!(config.streaming);
        assert!(!config.use_color);
    }
}
