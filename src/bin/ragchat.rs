//! Interactive terminal client for a retrieval-augmented question-answering service.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the server on http://localhost:8000
//! ragchat
//!
//! # Point at another server
//! ragchat --server http://rag.internal:9000
//!
//! # Suggest a different folder for /ingest and log every request
//! ragchat --data-dir /srv/docs --verbose
//! ```
//!
//! # Commands
//!
//! Anything not starting with `/` is sent as a question.  Slash commands:
//! - `/history`, `/close` - Show or dismiss the session history
//! - `/clear` - Clear the session history
//! - `/sources [n]` - Toggle the citations of an answer
//! - `/ingest [path]` - Ingest a folder on the server
//! - `/upload [file]` - Upload a document
//! - `/status`, `/new`, `/session`, `/help`, `/quit`

use std::path::PathBuf;
use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::time::Instant;

use ragchat::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatController, PlainTextRenderer, Prompter, Renderer,
    Toast, help_text, parse_command, parse_yes,
};
use ragchat::{RagClient, StderrLogger};

/// Answers controller prompts with the same line editor the chat reads from.
struct LinePrompter {
    editor: DefaultEditor,
}

impl LinePrompter {
    fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    fn readline(&mut self, prompt: &str) -> rustyline::Result<String> {
        self.editor.readline(prompt)
    }

    fn add_history_entry(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

impl Prompter for LinePrompter {
    fn confirm(&mut self, question: &str) -> bool {
        match self.editor.readline(&format!("{question} [y/N] ")) {
            Ok(answer) => parse_yes(&answer),
            Err(_) => false,
        }
    }

    fn prompt(&mut self, question: &str, default: &str) -> Option<String> {
        match self
            .editor
            .readline_with_initial(&format!("{question} "), (default, ""))
        {
            Ok(answer) => Some(answer.trim().to_string()).filter(|a| !a.is_empty()),
            Err(_) => None,
        }
    }

    fn select_file(&mut self) -> Option<PathBuf> {
        self.prompt("File to upload:", "").map(PathBuf::from)
    }
}

/// Main entry point for the ragchat application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("ragchat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let mut client = RagClient::with_options(config.server_url.clone(), config.timeout)?;
    if config.verbose {
        client = client.with_logger(Arc::new(StderrLogger));
    }
    let server = client.base_url().to_string();

    let mut controller = ChatController::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut prompter = LinePrompter::new()?;

    renderer.print_info(&format!("RAG chat (server: {server})"));
    renderer.print_info("Type /help for commands, /quit to exit\n");
    renderer.print_welcome();
    controller.check_status(&mut renderer).await;

    loop {
        let now = Instant::now();
        controller.notifications_mut().prune(now);
        let live: Vec<&Toast> = controller.notifications().visible(now).collect();
        renderer.show_toasts(&live);

        let readline = prompter.readline("You: ");
        renderer.hide_toasts();

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    controller.dismiss_overlay(&mut renderer);
                    continue;
                }

                prompter.add_history_entry(line);

                let command = parse_command(line);
                let dismissed = controller.dismiss_overlay(&mut renderer);

                // Check for slash commands
                if let Some(cmd) = command {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Close => {
                            if !dismissed {
                                renderer.print_info("Nothing to close.");
                            }
                        }
                        ChatCommand::History => {
                            controller.show_history(&mut renderer).await;
                        }
                        ChatCommand::Clear => {
                            controller.clear_history(&mut prompter, &mut renderer).await;
                        }
                        ChatCommand::Ingest(path) => {
                            controller.ingest(path, &mut prompter, &mut renderer).await;
                        }
                        ChatCommand::Upload(path) => {
                            controller.upload(path, &mut prompter, &mut renderer).await;
                        }
                        ChatCommand::Sources(which) => {
                            controller.toggle_sources(which, &mut renderer);
                        }
                        ChatCommand::Status => {
                            controller.check_status(&mut renderer).await;
                        }
                        ChatCommand::New => {
                            controller.new_session(&mut renderer).await;
                        }
                        ChatCommand::Session => {
                            let id = controller.session_id().unwrap_or("(none)");
                            renderer.print_info(&format!("Session: {id}"));
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular question
                controller.ask(line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt clears the line
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}
