//! Interactive terminal client for the Llama chat backend.
//!
//! This binary provides a REPL with three screens: login, signup, and
//! chat. Authentication stores a session token on disk; the chat screen
//! talks to the backend's `/chat` responder (or the streaming `/ollama`
//! responder) and supports reply targets.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against the development backend
//! llamachat
//!
//! # Point at a different backend
//! llamachat --base-url http://chat.example.com/
//!
//! # Start in streaming mode with a specific model
//! llamachat --stream --model llama3.1
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/reply <n>` - Reply to message n
//! - `/cancel` - Cancel the reply target
//! - `/history` - Show the conversation
//! - `/clear` - Clear conversation history
//! - `/stream on|off` - Toggle the streaming responder
//! - `/logout` - Log out
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use llamachat::render::{PlainTextRenderer, Renderer};
use llamachat::session::{
    ChatCommand, ChatSession, Conversation, LOGIN_FALLBACK, SIGNUP_FALLBACK, SessionArgs,
    SessionConfig, TokenStore, auth_error_message, chat_error_message, help_text, login, logout,
    parse_command, signup,
};
use llamachat::types::Credentials;
use llamachat::{Error, Llama};

/// The three screens of the client.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Screen {
    Login,
    Signup,
    Chat,
}

/// What a screen loop decided to do next.
enum Flow {
    Goto(Screen),
    Quit,
}

/// Main entry point for the llamachat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = SessionArgs::from_command_line_relaxed("llamachat [OPTIONS]");
    let config = SessionConfig::from(args);
    let use_color = config.use_color;

    let client = Llama::new(config.base_url.clone())?;
    let store = TokenStore::new(config.token_file.clone());
    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Requests are never cancelled once issued; Ctrl+C outside the prompt
    // terminates the whole client instead.
    ctrlc::set_handler(|| {
        println!();
        std::process::exit(130);
    })?;

    let mut screen = if store.get()?.is_some() {
        Screen::Chat
    } else {
        Screen::Login
    };

    loop {
        let flow = match screen {
            Screen::Login => login_screen(&mut rl, &mut renderer, &session, &store).await?,
            Screen::Signup => signup_screen(&mut rl, &mut renderer, &session, &store).await?,
            Screen::Chat => chat_screen(&mut rl, &mut renderer, &mut session, &store).await?,
        };
        match flow {
            Flow::Goto(next) => screen = next,
            Flow::Quit => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Runs the login screen until the user authenticates or navigates away.
async fn login_screen(
    rl: &mut DefaultEditor,
    renderer: &mut PlainTextRenderer,
    session: &ChatSession,
    store: &TokenStore,
) -> Result<Flow, ReadlineError> {
    renderer.print_info("Login (/signup to create an account, /quit to exit)");
    loop {
        let email = match prompt(rl, "Email: ")? {
            Some(line) => line,
            None => return Ok(Flow::Quit),
        };
        match email.as_str() {
            "" => continue,
            "/signup" => return Ok(Flow::Goto(Screen::Signup)),
            "/quit" | "/q" | "/exit" => return Ok(Flow::Quit),
            _ => {}
        }
        let Some(password) = prompt(rl, "Password: ")? else {
            return Ok(Flow::Quit);
        };

        let credentials = Credentials::new(email, password);
        match login(session.client(), store, &credentials).await {
            Ok(_) => {
                renderer.print_info("Logged in.");
                return Ok(Flow::Goto(Screen::Chat));
            }
            Err(err) => report_auth_error(renderer, &err, LOGIN_FALLBACK),
        }
    }
}

/// Runs the signup screen until the user registers or navigates away.
async fn signup_screen(
    rl: &mut DefaultEditor,
    renderer: &mut PlainTextRenderer,
    session: &ChatSession,
    store: &TokenStore,
) -> Result<Flow, ReadlineError> {
    renderer.print_info("Create an account (/login to go back, /quit to exit)");
    loop {
        let email = match prompt(rl, "Email: ")? {
            Some(line) => line,
            None => return Ok(Flow::Quit),
        };
        match email.as_str() {
            "" => continue,
            "/login" => return Ok(Flow::Goto(Screen::Login)),
            "/quit" | "/q" | "/exit" => return Ok(Flow::Quit),
            _ => {}
        }
        let Some(password) = prompt(rl, "Password: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(confirm) = prompt(rl, "Confirm password: ")? else {
            return Ok(Flow::Quit);
        };

        let credentials = Credentials::new(email, password);
        match signup(session.client(), store, &credentials, &confirm).await {
            Ok(_) => {
                renderer.print_info("Account created.");
                return Ok(Flow::Goto(Screen::Chat));
            }
            Err(err) => report_auth_error(renderer, &err, SIGNUP_FALLBACK),
        }
    }
}

/// Runs the chat screen until the user logs out or quits.
async fn chat_screen(
    rl: &mut DefaultEditor,
    renderer: &mut PlainTextRenderer,
    session: &mut ChatSession,
    store: &TokenStore,
) -> Result<Flow, ReadlineError> {
    renderer.print_info("Chat (/help for commands)");
    loop {
        if let Some(target) = session.reply_target() {
            renderer.print_reply_target(target);
        }

        let line = match prompt(rl, "You: ")? {
            Some(line) => line,
            None => return Ok(Flow::Quit),
        };
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        if let Some(cmd) = parse_command(&line) {
            match cmd {
                ChatCommand::Quit => return Ok(Flow::Quit),
                ChatCommand::Logout => {
                    if let Err(err) = logout(store) {
                        renderer.print_error(&err.to_string());
                    } else {
                        renderer.print_info("Logged out.");
                        session.clear_local();
                        return Ok(Flow::Goto(Screen::Login));
                    }
                }
                ChatCommand::Clear => match session.clear_all().await {
                    Ok(()) => renderer.print_info("Conversation cleared."),
                    Err(err) => renderer.print_error(&chat_error_message(&err)),
                },
                ChatCommand::Reply(index) => match session.reply_to(index) {
                    Ok(target) => {
                        let target = target.to_string();
                        renderer.print_reply_target(&target);
                    }
                    Err(err) => renderer.print_error(&err.to_string()),
                },
                ChatCommand::CancelReply => {
                    session.cancel_reply();
                    renderer.print_info("Reply cancelled.");
                }
                ChatCommand::History => print_history(renderer, session.conversation()),
                ChatCommand::Stream(enabled) => {
                    session.set_streaming(enabled);
                    if enabled {
                        renderer.print_info("Streaming responder enabled.");
                    } else {
                        renderer.print_info("Streaming responder disabled.");
                    }
                }
                ChatCommand::Model(model) => {
                    session.set_ollama_model(model.clone());
                    renderer.print_info(&format!("Streaming model changed to: {model}"));
                }
                ChatCommand::Stats => print_stats(session),
                ChatCommand::Help => {
                    for line in help_text().lines() {
                        println!("    {}", line);
                    }
                }
                ChatCommand::Invalid(message) => renderer.print_error(&message),
            }
            continue;
        }

        // Regular message - send to the backend
        if session.streaming() {
            if let Err(err) = session.send_streaming(&line, renderer).await {
                report_chat_error(renderer, &err);
            }
        } else {
            match session.send(&line).await {
                Ok(Some(reply)) => {
                    renderer.print_message(&llamachat::types::ChatMessage::bot(reply));
                }
                Ok(None) => {}
                Err(err) => report_chat_error(renderer, &err),
            }
        }
    }
}

/// Reads one line, mapping Ctrl+C to an empty retry and Ctrl+D to quit.
fn prompt(rl: &mut DefaultEditor, text: &str) -> Result<Option<String>, ReadlineError> {
    match rl.readline(text) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) => {
            println!();
            Ok(Some(String::new()))
        }
        Err(ReadlineError::Eof) => {
            println!();
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn report_auth_error(renderer: &mut PlainTextRenderer, err: &Error, fallback: &str) {
    renderer.print_error(&auth_error_message(err, fallback));
    if err.is_transport() {
        eprintln!("{err}");
    }
}

fn report_chat_error(renderer: &mut PlainTextRenderer, err: &Error) {
    renderer.print_error(&chat_error_message(err));
    if err.is_transport() {
        eprintln!("{err}");
    }
}

fn print_history(renderer: &mut PlainTextRenderer, conversation: &Conversation) {
    if conversation.is_empty() {
        renderer.print_info("No messages yet.");
        return;
    }
    for (index, message) in conversation.messages().iter().enumerate() {
        print!("[{index}] ");
        renderer.print_message(message);
    }
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Backend: {}", stats.base_url);
    println!(
        "      Messages: {} ({} from you, {} from the bot)",
        stats.message_count, stats.user_messages, stats.bot_messages
    );
    println!(
        "      Reply target: {}",
        if stats.reply_target_active {
            "active"
        } else {
            "(none)"
        }
    );
    println!(
        "      Responder: {}",
        if stats.streaming {
            "streaming"
        } else {
            "canned"
        }
    );
    println!("      Streaming model: {}", stats.ollama_model);
}
