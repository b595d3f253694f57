//! Interactive chat front end for the question-answering service.
//!
//! This module holds everything between the user and the [`Backend`](crate::Backend):
//!
//! - Question submission with a single in-flight query at a time
//! - Collapsible citations under each answer
//! - Session history viewing and clearing
//! - Document ingestion and file upload
//! - Stacked notifications that expire on their own
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`controller`]: Client state and the flows behind every user action
//! - [`view`]: The view model the controller mutates and renderers display
//! - [`notify`]: Timed notifications
//! - [`prompter`]: Confirmations and input prompts
//! - [`commands`]: Slash command parsing

mod commands;
mod config;
mod controller;
mod notify;
mod prompter;
mod view;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_INGEST_PATH};
pub use controller::{
    APOLOGY_TEXT, CLEAR_CONFIRMATION, ChatController, ClientState, INGEST_PROMPT, OFFLINE_TEXT,
    PendingQuery,
};
pub use notify::{Notifications, TOAST_DURATION, Toast, ToastKind};
pub use prompter::{Prompter, parse_yes};
pub use view::{
    ControlState, EMPTY_HISTORY_TEXT, Entry, HistoryOverlay, Message, Sender, ServerState,
    SourcesPanel, THINKING_TEXT, ThinkingId, Transcript, WELCOME_TEXT, WELCOME_TITLE,
};
