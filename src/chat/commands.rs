//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to trigger the auxiliary operations of the service without
//! sending a question.

/// A parsed chat command.
///
/// These commands are handled locally and are never sent as questions.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Show the server-side history of the current session.
    History,

    /// Clear the server-side history of the current session.
    Clear,

    /// Dismiss the history overlay.
    Close,

    /// Ingest a folder on the server.  `None` prompts for the path.
    Ingest(Option<String>),

    /// Upload a local file.  `None` prompts for the file.
    Upload(Option<String>),

    /// Toggle a citation panel.  `None` picks the most recent one.
    Sources(Option<usize>),

    /// Check the server status again.
    Status,

    /// Drop the current session and start a fresh thread.
    New,

    /// Print the current session identifier.
    Session,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a question.
///
/// # Examples
///
/// ```
/// # use ragchat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/ingest ./data").is_some());
/// assert!(parse_command("What is a vector store?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "history" => no_argument(argument, ChatCommand::History, "/history"),
        "clear" => no_argument(argument, ChatCommand::Clear, "/clear"),
        "close" => no_argument(argument, ChatCommand::Close, "/close"),
        "ingest" => ChatCommand::Ingest(argument.map(|s| s.to_string())),
        "upload" => ChatCommand::Upload(argument.map(|s| s.to_string())),
        "sources" => match argument {
            None => ChatCommand::Sources(None),
            Some(arg) => match arg.parse::<usize>() {
                Ok(n) if n > 0 => ChatCommand::Sources(Some(n)),
                _ => ChatCommand::Invalid("/sources expects a positive integer".to_string()),
            },
        },
        "status" => no_argument(argument, ChatCommand::Status, "/status"),
        "new" => no_argument(argument, ChatCommand::New, "/new"),
        "session" => no_argument(argument, ChatCommand::Session, "/session"),
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn no_argument(argument: Option<&str>, command: ChatCommand, name: &str) -> ChatCommand {
    match argument {
        None => command,
        Some(_) => ChatCommand::Invalid(format!("{} takes no arguments", name)),
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /history               Show the conversation history stored on the server
  /close                 Close the history view
  /clear                 Clear the conversation history (asks for confirmation)
  /sources [n]           Show or hide the sources of an answer (default: latest)
  /ingest [path]         Ingest a folder of documents on the server
  /upload [file]         Upload a document and ingest it
  /status                Check the server status again
  /new                   Forget the current session and start over
  /session               Show the current session identifier
  /help                  Show this help message
  /quit                  Exit the chat"#
}
