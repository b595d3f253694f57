//! View model for the chat thread.
//!
//! Everything the user sees lives here as plain data: the transcript of
//! messages, the status indicator, the state of the input controls and the
//! history overlay.  A [`Renderer`](crate::Renderer) turns changes to this
//! model into terminal output; tests assert on the model directly.

use crate::types::{HistoryItem, Source, StatusResponse};

/// Heading of the welcome placeholder.
pub const WELCOME_TITLE: &str = "Welcome to RAG Chat Assistant";

/// Body of the welcome placeholder.
pub const WELCOME_TEXT: &str = "Ask me anything about your documents!";

/// Text shown while waiting for an answer.
pub const THINKING_TEXT: &str = "Thinking...";

/// Text shown by the history overlay when the server has nothing recorded.
pub const EMPTY_HISTORY_TEXT: &str = "No conversation history yet.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// The person at the keyboard.
    User,
    /// The question-answering service.
    Assistant,
}

impl Sender {
    /// Label printed in front of the message bubble.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

/// The collapsible list of citations under an assistant message.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcesPanel {
    sources: Vec<Source>,
    expanded: bool,
}

impl SourcesPanel {
    /// Create a collapsed panel.
    pub fn new(sources: Vec<Source>) -> Self {
        Self {
            sources,
            expanded: false,
        }
    }

    /// The citations in the order the server returned them.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Whether the excerpts are currently shown.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Show or hide the excerpts.  Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// The toggle caption, e.g. `Sources (2)`.
    pub fn caption(&self) -> String {
        format!("Sources ({})", self.sources.len())
    }

    /// Indicator icon reflecting the expanded state.
    pub fn indicator(&self) -> &'static str {
        if self.expanded { "[-]" } else { "[+]" }
    }

    /// One `(heading, excerpt)` pair per source, numbered from 1.
    pub fn items(&self) -> Vec<(String, String)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                (
                    format!("{}. {}", idx + 1, source.label()),
                    source.excerpt(),
                )
            })
            .collect()
    }
}

/// A rendered chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Author of the message.
    pub sender: Sender,
    /// Message body.
    pub text: String,
    /// Citations, present only when the server returned at least one.
    pub sources: Option<SourcesPanel>,
}

impl Message {
    /// A message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sources: None,
        }
    }

    /// A message from the assistant with its citations.
    pub fn assistant(text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            sources: if sources.is_empty() {
                None
            } else {
                Some(SourcesPanel::new(sources))
            },
        }
    }
}

/// Identifies one "thinking" placeholder so the right one gets removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThinkingId(u64);

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// The welcome placeholder shown on an empty thread.
    Welcome,
    /// A user or assistant message.
    Message(Message),
    /// A transient placeholder while an answer is pending.
    Thinking(ThinkingId),
}

/// The scrolling list of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_thinking: u64,
    scroll: usize,
}

impl Transcript {
    /// A transcript holding only the welcome placeholder.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry::Welcome],
            next_thinking: 0,
            scroll: 0,
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Messages only, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            _ => None,
        })
    }

    /// True when the welcome placeholder is showing.
    pub fn has_welcome(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, Entry::Welcome))
    }

    /// True when some answer is pending.
    pub fn is_thinking(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, Entry::Thinking(_)))
    }

    /// Index of the entry the view is scrolled to.
    pub fn scroll_position(&self) -> usize {
        self.scroll
    }

    /// True when the newest entry is in view.
    pub fn is_scrolled_to_end(&self) -> bool {
        self.entries.is_empty() || self.scroll == self.entries.len() - 1
    }

    /// Remove the welcome placeholder, if present.
    pub fn remove_welcome(&mut self) {
        self.entries.retain(|e| !matches!(e, Entry::Welcome));
        self.scroll_to_end();
    }

    /// Append a message and scroll to it.
    pub fn push_message(&mut self, message: Message) {
        self.entries.push(Entry::Message(message));
        self.scroll_to_end();
    }

    /// Append a thinking placeholder and scroll to it.
    pub fn push_thinking(&mut self) -> ThinkingId {
        let id = ThinkingId(self.next_thinking);
        self.next_thinking += 1;
        self.entries.push(Entry::Thinking(id));
        self.scroll_to_end();
        id
    }

    /// Remove the given thinking placeholder.  Returns false if it was already gone.
    pub fn remove_thinking(&mut self, id: ThinkingId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| *e != Entry::Thinking(id));
        self.scroll_to_end();
        self.entries.len() != before
    }

    /// Drop every entry and show the welcome placeholder again.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(Entry::Welcome);
        self.scroll = 0;
    }

    /// Toggle a citation panel.
    ///
    /// `which` is the 1-based number of the panel counting only messages with
    /// citations; `None` picks the most recent one.  Returns the panel after
    /// toggling together with its number, or `None` if there is no such panel.
    pub fn toggle_sources(&mut self, which: Option<usize>) -> Option<(usize, &SourcesPanel)> {
        let mut panels: Vec<&mut SourcesPanel> = self
            .entries
            .iter_mut()
            .filter_map(|entry| match entry {
                Entry::Message(Message {
                    sources: Some(panel),
                    ..
                }) => Some(panel),
                _ => None,
            })
            .collect();
        let number = match which {
            Some(0) => return None,
            Some(n) => n,
            None => panels.len(),
        };
        if number == 0 || number > panels.len() {
            return None;
        }
        let panel = panels.swap_remove(number - 1);
        panel.toggle();
        Some((number, panel))
    }

    fn scroll_to_end(&mut self) {
        self.scroll = self.entries.len().saturating_sub(1);
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// The server status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServerState {
    /// No successful status check yet.
    #[default]
    Connecting,
    /// The server reported itself online.
    Ready {
        /// Model answering questions, if reported.
        model_name: Option<String>,
        /// Whether the vector store is initialized, if reported.
        vectorstore_initialized: Option<bool>,
    },
    /// The status check failed.
    Offline,
}

impl ServerState {
    /// Build the ready state from a status body.
    pub fn ready(status: &StatusResponse) -> Self {
        ServerState::Ready {
            model_name: status.model_name.clone(),
            vectorstore_initialized: status.vectorstore_initialized,
        }
    }

    /// Short text shown in the indicator.
    pub fn text(&self) -> &'static str {
        match self {
            ServerState::Connecting => "Connecting...",
            ServerState::Ready { .. } => "Ready",
            ServerState::Offline => "Offline",
        }
    }

    /// True if the last status check succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self, ServerState::Ready { .. })
    }
}

/// State of the input controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    /// Text typed but not yet submitted.
    pub draft: String,
    /// Whether the submit control accepts input.
    pub submit_enabled: bool,
    /// Whether the input field should have focus.
    pub input_focused: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            draft: String::new(),
            submit_enabled: true,
            input_focused: true,
        }
    }
}

/// The history overlay shown over the thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryOverlay {
    items: Vec<HistoryItem>,
}

impl HistoryOverlay {
    /// Create an overlay for the given exchanges.
    pub fn new(items: Vec<HistoryItem>) -> Self {
        Self { items }
    }

    /// The exchanges, oldest first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Lines to display, numbered by position.
    pub fn lines(&self) -> Vec<String> {
        if self.items.is_empty() {
            return vec![EMPTY_HISTORY_TEXT.to_string()];
        }
        let mut lines = Vec::with_capacity(self.items.len() * 2);
        for (idx, item) in self.items.iter().enumerate() {
            lines.push(format!("Q{}: {}", idx + 1, item.question));
            lines.push(format!("A: {}", item.answer));
        }
        lines
    }
}
