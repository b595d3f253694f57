//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::chat::notify::TOAST_DURATION;

/// Folder suggested when asking which documents to ingest.
pub const DEFAULT_INGEST_PATH: &str = "./data";

/// Command-line arguments for the ragchat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Address of the question-answering service.
    #[arrrg(
        optional,
        "Server address (default: $RAGCHAT_SERVER or http://localhost:8000)",
        "URL"
    )]
    pub server: Option<String>,

    /// Folder suggested by /ingest.
    #[arrrg(optional, "Folder suggested by /ingest (default: ./data)", "PATH")]
    pub data_dir: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: none)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Ask the server not to record exchanges in the session history.
    #[arrrg(flag, "Do not record exchanges in the server-side history")]
    pub no_history: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log every HTTP request to stderr.
    #[arrrg(flag, "Log HTTP requests to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Server address; `None` defers to `RAGCHAT_SERVER` and then the built-in default.
    pub server_url: Option<String>,

    /// Folder suggested when prompting for an ingestion path.
    pub default_ingest_path: String,

    /// Optional request timeout.  `None` keeps the transport default.
    pub timeout: Option<Duration>,

    /// Whether queries ask the server to maintain history.
    pub maintain_history: bool,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether HTTP requests are logged to stderr.
    pub verbose: bool,

    /// How long notifications stay visible.
    pub toast_duration: Duration,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Server: `RAGCHAT_SERVER` or `http://localhost:8000`
    /// - Ingestion path: `./data`
    /// - Timeout: none
    /// - History: maintained
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            server_url: None,
            default_ingest_path: DEFAULT_INGEST_PATH.to_string(),
            timeout: None,
            maintain_history: true,
            use_color: true,
            verbose: false,
            toast_duration: TOAST_DURATION,
        }
    }

    /// Sets the server address.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Sets the suggested ingestion path.
    pub fn with_default_ingest_path(mut self, path: impl Into<String>) -> Self {
        self.default_ingest_path = path.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets whether the server maintains history.
    pub fn with_maintain_history(mut self, maintain_history: bool) -> Self {
        self.maintain_history = maintain_history;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Enables request logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets how long notifications stay visible.
    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            server_url: args.server,
            default_ingest_path: args
                .data_dir
                .unwrap_or_else(|| DEFAULT_INGEST_PATH.to_string()),
            timeout: args.timeout_secs.map(Duration::from_secs),
            maintain_history: !args.no_history,
            use_color: !args.no_color,
            verbose: args.verbose,
            ..ChatConfig::new()
        }
    }
}
