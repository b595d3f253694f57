use serde::{Deserialize, Serialize};

/// The status string the service reports when it is ready to answer.
pub const ONLINE: &str = "online";

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// Server status, `"online"` when ready.
    pub status: String,

    /// Whether the server's vector store has been initialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectorstore_initialized: Option<bool>,

    /// Name of the model answering questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl StatusResponse {
    /// Create a status response carrying only the status string.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            vectorstore_initialized: None,
            model_name: None,
        }
    }

    /// Set whether the vector store is initialized.
    pub fn with_vectorstore_initialized(mut self, initialized: bool) -> Self {
        self.vectorstore_initialized = Some(initialized);
        self
    }

    /// Set the model name.
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// True when the server reports itself online.
    pub fn is_online(&self) -> bool {
        self.status == ONLINE
    }
}
