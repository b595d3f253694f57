//! The chat controller.
//!
//! [`ChatController`] owns all client state (session identifier, processing
//! flag, the view model and the notification stack) and turns user actions
//! into backend calls.  Every flow catches its own errors and converts them to
//! notifications, so the controller always returns to an idle state.

use std::path::{Path, PathBuf};

use crate::Renderer;
use crate::backend::Backend;
use crate::chat::config::ChatConfig;
use crate::chat::notify::{Notifications, ToastKind};
use crate::chat::prompter::Prompter;
use crate::chat::view::{
    ControlState, HistoryOverlay, Message, ServerState, ThinkingId, Transcript,
};
use crate::error::{Error, Result};
use crate::observability::{
    CHAT_DROPPED_SUBMISSIONS, CHAT_NOTIFICATIONS, CHAT_QUERIES, CHAT_QUERY_FAILURES,
};
use crate::types::{IngestRequest, QueryRequest, QueryResponse};

/// Reply shown in the thread when a query fails.
pub const APOLOGY_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Notification raised when the status check fails.
pub const OFFLINE_TEXT: &str = "Server is offline. Please start the server.";

/// Question asked before clearing history.
pub const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear the conversation history?";

/// Question asked when ingesting without a path.
pub const INGEST_PROMPT: &str = "Enter the path to the data folder:";

/// State shared by every flow of the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    session_id: Option<String>,
    processing: bool,
}

impl ClientState {
    /// The session the next query continues, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// True while a query is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }
}

/// A query that has been started but not yet settled.
///
/// Produced by [`ChatController::begin_query`] and consumed by
/// [`ChatController::finish_query`].
#[derive(Debug)]
#[must_use = "a pending query must be settled with finish_query"]
pub struct PendingQuery {
    request: QueryRequest,
    thinking: ThinkingId,
}

impl PendingQuery {
    /// The request to send to the backend.
    pub fn request(&self) -> &QueryRequest {
        &self.request
    }
}

/// Drives the chat view from user actions and backend responses.
pub struct ChatController<B: Backend> {
    backend: B,
    config: ChatConfig,
    state: ClientState,
    status: ServerState,
    controls: ControlState,
    transcript: Transcript,
    overlay: Option<HistoryOverlay>,
    notifications: Notifications,
    file_selection: Option<PathBuf>,
}

impl<B: Backend> ChatController<B> {
    /// Creates a controller showing the welcome placeholder.
    pub fn new(backend: B, config: ChatConfig) -> Self {
        let notifications = Notifications::with_duration(config.toast_duration);
        Self {
            backend,
            config,
            state: ClientState::default(),
            status: ServerState::default(),
            controls: ControlState::default(),
            transcript: Transcript::new(),
            overlay: None,
            notifications,
            file_selection: None,
        }
    }

    /// The backend this controller talks to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Session identifier and processing flag.
    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// The session the next query continues, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.state.session_id()
    }

    /// The status indicator.
    pub fn status(&self) -> &ServerState {
        &self.status
    }

    /// The input controls.
    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// The message thread.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The history overlay, if open.
    pub fn overlay(&self) -> Option<&HistoryOverlay> {
        self.overlay.as_ref()
    }

    /// The notification stack.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Mutable access to the notification stack, e.g. to prune expired toasts.
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// The file currently selected for upload.
    pub fn file_selection(&self) -> Option<&Path> {
        self.file_selection.as_deref()
    }

    fn notify(&mut self, kind: ToastKind, message: impl Into<String>, renderer: &mut dyn Renderer) {
        CHAT_NOTIFICATIONS.click();
        let toast = self.notifications.push(kind, message);
        renderer.print_toast(toast);
    }

    fn push_message(&mut self, message: Message, renderer: &mut dyn Renderer) {
        renderer.print_message(&message);
        self.transcript.push_message(message);
    }

    ///////////////////////////////////////// Status ////////////////////////////////////////

    /// Check the server once and update the status indicator.
    pub async fn check_status(&mut self, renderer: &mut dyn Renderer) {
        match self.backend.status().await {
            Ok(status) if status.is_online() => {
                self.status = ServerState::ready(&status);
                renderer.print_status(&self.status);
            }
            Ok(status) => {
                renderer.print_info(&format!("Server reported status: {}", status.status));
            }
            Err(_) => {
                self.status = ServerState::Offline;
                renderer.print_status(&self.status);
                self.notify(ToastKind::Error, OFFLINE_TEXT, renderer);
            }
        }
    }

    ///////////////////////////////////////// Queries ///////////////////////////////////////

    /// Replace the text in the input field.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.controls.draft = text.into();
    }

    /// Start a query from the input field.
    ///
    /// Returns `None`, touching nothing, when the trimmed draft is empty or a
    /// query is already in flight.
    pub fn begin_query(&mut self, renderer: &mut dyn Renderer) -> Option<PendingQuery> {
        let question = self.controls.draft.trim().to_string();
        if question.is_empty() {
            return None;
        }
        if self.state.processing {
            CHAT_DROPPED_SUBMISSIONS.click();
            return None;
        }

        self.transcript.remove_welcome();
        self.push_message(Message::user(question.clone()), renderer);
        self.controls.draft.clear();
        let thinking = self.transcript.push_thinking();
        renderer.print_thinking();
        self.controls.submit_enabled = false;
        self.state.processing = true;
        CHAT_QUERIES.click();

        let request = QueryRequest::new(question, self.state.session_id.clone())
            .with_maintain_history(self.config.maintain_history);
        Some(PendingQuery { request, thinking })
    }

    /// Settle a query started with [`begin_query`](Self::begin_query).
    pub fn finish_query(
        &mut self,
        pending: PendingQuery,
        result: Result<QueryResponse>,
        renderer: &mut dyn Renderer,
    ) {
        self.transcript.remove_thinking(pending.thinking);
        renderer.clear_thinking();
        match result {
            Ok(response) => {
                if let Some(session_id) = response.session_id.filter(|s| !s.is_empty()) {
                    self.state.session_id = Some(session_id);
                }
                self.push_message(
                    Message::assistant(response.answer, response.sources),
                    renderer,
                );
            }
            Err(err) => {
                CHAT_QUERY_FAILURES.click();
                self.notify(ToastKind::Error, format!("Error: {err}"), renderer);
                self.push_message(Message::assistant(APOLOGY_TEXT, Vec::new()), renderer);
            }
        }
        self.state.processing = false;
        self.controls.submit_enabled = true;
        self.controls.input_focused = true;
    }

    /// Submit the input field.  Returns true if a request was sent.
    pub async fn submit(&mut self, renderer: &mut dyn Renderer) -> bool {
        let Some(pending) = self.begin_query(renderer) else {
            return false;
        };
        let result = self.backend.query(pending.request().clone()).await;
        self.finish_query(pending, result, renderer);
        true
    }

    /// Type `question` into the input field and submit it.
    pub async fn ask(&mut self, question: &str, renderer: &mut dyn Renderer) -> bool {
        self.set_draft(question);
        self.submit(renderer).await
    }

    /// Show or hide a citation panel.  `which` is 1-based; `None` picks the latest.
    pub fn toggle_sources(&mut self, which: Option<usize>, renderer: &mut dyn Renderer) -> bool {
        match self.transcript.toggle_sources(which) {
            Some((number, panel)) => {
                renderer.print_sources(number, panel);
                true
            }
            None => {
                renderer.print_error("No such sources to show.");
                false
            }
        }
    }

    ///////////////////////////////////////// History ///////////////////////////////////////

    /// Fetch the session history and open the overlay.
    pub async fn show_history(&mut self, renderer: &mut dyn Renderer) {
        let Some(session_id) = self.state.session_id.clone() else {
            self.notify(ToastKind::Error, "No conversation history yet.", renderer);
            return;
        };
        match self.backend.history(&session_id).await {
            Ok(response) => {
                let overlay = HistoryOverlay::new(response.history);
                renderer.print_overlay(&overlay);
                self.overlay = Some(overlay);
            }
            Err(err) => {
                self.notify(
                    ToastKind::Error,
                    format!("Error loading history: {err}"),
                    renderer,
                );
            }
        }
    }

    /// Close the history overlay.  Returns true if it was open.
    pub fn dismiss_overlay(&mut self, renderer: &mut dyn Renderer) -> bool {
        if self.overlay.take().is_some() {
            renderer.close_overlay();
            true
        } else {
            false
        }
    }

    /// Ask for confirmation and clear the session history on the server.
    ///
    /// The session identifier is kept: the server keeps the session and only
    /// empties its history, so later questions continue in the same session.
    pub async fn clear_history(
        &mut self,
        prompter: &mut dyn Prompter,
        renderer: &mut dyn Renderer,
    ) {
        let Some(session_id) = self.state.session_id.clone() else {
            self.notify(ToastKind::Error, "No conversation history to clear.", renderer);
            return;
        };
        if !prompter.confirm(CLEAR_CONFIRMATION) {
            return;
        }
        match self.backend.clear_history(&session_id).await {
            Ok(()) => {
                self.notify(ToastKind::Success, "History cleared successfully!", renderer);
                self.transcript.reset();
                renderer.print_welcome();
            }
            Err(err) => {
                self.notify(
                    ToastKind::Error,
                    format!("Error clearing history: {err}"),
                    renderer,
                );
            }
        }
    }

    /// Delete the server session, forget its identifier and reset the thread.
    pub async fn new_session(&mut self, renderer: &mut dyn Renderer) {
        if let Some(session_id) = self.state.session_id.clone() {
            if let Err(err) = self.backend.delete_session(&session_id).await {
                self.notify(
                    ToastKind::Error,
                    format!("Error deleting session: {err}"),
                    renderer,
                );
                return;
            }
            self.state.session_id = None;
        }
        self.overlay = None;
        self.transcript.reset();
        self.notify(ToastKind::Success, "Started a new conversation.", renderer);
        renderer.print_welcome();
    }

    ///////////////////////////////////////// Ingestion /////////////////////////////////////

    /// Ask the server to ingest a folder.
    ///
    /// `path` answers the folder prompt up front; without it the user is asked,
    /// with the configured default pre-filled.
    pub async fn ingest(
        &mut self,
        path: Option<String>,
        prompter: &mut dyn Prompter,
        renderer: &mut dyn Renderer,
    ) {
        let path = match path {
            Some(path) => Some(path),
            None => prompter.prompt(INGEST_PROMPT, &self.config.default_ingest_path),
        };
        let Some(path) = path.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) else {
            return;
        };

        self.notify(ToastKind::Success, "Ingesting documents...", renderer);
        let result = self
            .backend
            .ingest(IngestRequest::new(path))
            .await
            .and_then(|response| response.ensure_success("Ingestion failed"));
        match result {
            Ok(response) => {
                let chunks = response.documents_processed.unwrap_or(0);
                self.notify(
                    ToastKind::Success,
                    format!("Successfully ingested {chunks} document chunks!"),
                    renderer,
                );
            }
            Err(err) if err.is_rejected() => {
                self.notify(ToastKind::Error, err.message().to_string(), renderer);
            }
            Err(err) => {
                self.notify(
                    ToastKind::Error,
                    format!("Error ingesting documents: {err}"),
                    renderer,
                );
            }
        }
    }

    ///////////////////////////////////////// Upload ////////////////////////////////////////

    /// Select a file and upload it.
    ///
    /// `path` stands in for the file chooser; without it the prompter is asked.
    /// Choosing nothing is a no-op.
    pub async fn upload(
        &mut self,
        path: Option<String>,
        prompter: &mut dyn Prompter,
        renderer: &mut dyn Renderer,
    ) {
        self.file_selection = match path {
            Some(path) => Some(PathBuf::from(path)),
            None => prompter.select_file(),
        };
        self.upload_selection(renderer).await;
    }

    /// Upload the selected file, then clear the selection whatever the outcome.
    pub async fn upload_selection(&mut self, renderer: &mut dyn Renderer) {
        let Some(path) = self.file_selection.clone() else {
            return;
        };
        let name = display_name(&path);
        self.notify(ToastKind::Success, format!("Uploading {name}..."), renderer);

        let result = match tokio::fs::read(&path).await {
            Ok(contents) => self
                .backend
                .upload(&name, contents)
                .await
                .and_then(|response| response.ensure_success("Upload failed")),
            Err(err) => Err(Error::io(format!("cannot read {}: {err}", path.display()), err)),
        };
        match result {
            Ok(_) => {
                self.notify(
                    ToastKind::Success,
                    format!("Successfully uploaded and processed {name}!"),
                    renderer,
                );
            }
            Err(err) if err.is_rejected() => {
                self.notify(ToastKind::Error, err.message().to_string(), renderer);
            }
            Err(err) => {
                self.notify(
                    ToastKind::Error,
                    format!("Error uploading file: {err}"),
                    renderer,
                );
            }
        }
        self.file_selection = None;
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
