//! Output rendering for the chat screens.
//!
//! This module provides the renderer trait and a plain-text implementation
//! used by the terminal client for conversation output, streamed reply
//! chunks, and inline error messages.

use std::io::{self, Stdout, Write};

use crate::types::{ChatMessage, Sender};

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the bot label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for informational messages).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for error messages).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for dim text (used for the reply-target banner).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, plain text without styling (for piping), or a test
/// renderer that records what was shown.
pub trait Renderer: Send {
    /// Print a message from the conversation with its sender label.
    fn print_message(&mut self, message: &ChatMessage);

    /// Called when a streamed reply begins.
    fn begin_reply(&mut self);

    /// Print a chunk of streamed reply text.
    fn print_chunk(&mut self, chunk: &str);

    /// Called when a streamed reply finishes.
    fn finish_reply(&mut self);

    /// Print the active reply-target banner.
    fn print_reply_target(&mut self, target: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout to ensure immediate display of streamed content.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn styled(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &ChatMessage) {
        let label = match message.sender {
            Sender::User => self.styled(ANSI_CYAN, "You:"),
            Sender::Bot => self.styled(ANSI_GREEN, "Bot:"),
        };
        println!("{} {}", label, message.text);
    }

    fn begin_reply(&mut self) {
        let label = self.styled(ANSI_GREEN, "Bot:");
        print!("{label} ");
        self.flush();
    }

    fn print_chunk(&mut self, chunk: &str) {
        print!("{chunk}");
        self.flush();
    }

    fn finish_reply(&mut self) {
        println!();
        self.flush();
    }

    fn print_reply_target(&mut self, target: &str) {
        println!("{}", self.styled(ANSI_DIM, &format!("Replying to: {target}")));
    }

    fn print_info(&mut self, info: &str) {
        println!("{}", self.styled(ANSI_YELLOW, info));
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("{}", self.styled(ANSI_RED, error));
    }
}
