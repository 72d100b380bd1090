//! Slash command parsing for the terminal client.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the session without sending messages to the
//! backend.

/// A parsed chat command.
///
/// These commands control the session and are not sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the conversation (server-side history and local list).
    Clear,

    /// Select the message at the given index as the reply target.
    Reply(usize),

    /// Cancel the active reply target.
    CancelReply,

    /// Show the full conversation so far.
    History,

    /// Switch between the canned and streaming responders.
    Stream(bool),

    /// Change the model used by the streaming responder.
    Model(String),

    /// Log out: clear the stored token and return to the login screen.
    Logout,

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use llamachat::session::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/reply 2").is_some());
/// assert!(parse_command("hello").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "reply" => match argument {
            Some(arg) => match arg.parse::<usize>() {
                Ok(index) => ChatCommand::Reply(index),
                Err(_) => ChatCommand::Invalid("/reply expects a message index".to_string()),
            },
            None => ChatCommand::Invalid("/reply requires a message index".to_string()),
        },
        "cancel" => ChatCommand::CancelReply,
        "history" => ChatCommand::History,
        "stream" => match argument.and_then(parse_on_off) {
            Some(value) => ChatCommand::Stream(value),
            None => ChatCommand::Invalid("/stream expects 'on' or 'off'".to_string()),
        },
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model name".to_string()),
        },
        "logout" => ChatCommand::Logout,
        "stats" | "status" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /reply <n>             Reply to message n (as shown by /history)
  /cancel                Cancel the active reply target
  /history               Show the conversation so far
  /clear                 Clear conversation history (server and local)
  /stream on|off         Switch between canned and streaming responders
  /model <name>          Change the streaming model (e.g., /model llama3)
  /stats                 Show session statistics
  /logout                Log out and return to the login screen
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_clear() {
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/CLEAR"), Some(ChatCommand::Clear));
    }

    #[test]
    fn parse_reply() {
        assert_eq!(parse_command("/reply 2"), Some(ChatCommand::Reply(2)));
        assert_eq!(
            parse_command("/reply"),
            Some(ChatCommand::Invalid(
                "/reply requires a message index".to_string()
            ))
        );
        assert_eq!(
            parse_command("/reply two"),
            Some(ChatCommand::Invalid(
                "/reply expects a message index".to_string()
            ))
        );
    }

    #[test]
    fn parse_cancel_and_history() {
        assert_eq!(parse_command("/cancel"), Some(ChatCommand::CancelReply));
        assert_eq!(parse_command("/history"), Some(ChatCommand::History));
    }

    #[test]
    fn parse_stream() {
        assert_eq!(parse_command("/stream on"), Some(ChatCommand::Stream(true)));
        assert_eq!(
            parse_command("/stream off"),
            Some(ChatCommand::Stream(false))
        );
        assert!(matches!(
            parse_command("/stream maybe"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_model() {
        assert_eq!(
            parse_command("/model llama3.1"),
            Some(ChatCommand::Model("llama3.1".to_string()))
        );
        assert!(matches!(
            parse_command("/model"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn regular_messages_are_not_commands() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("what does /quit do?"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert_eq!(
            parse_command("/frobnicate"),
            Some(ChatCommand::Invalid(
                "Unknown command: /frobnicate".to_string()
            ))
        );
    }
}
