use serde::{Deserialize, Serialize};

use crate::types::Source;

/// Body of `POST /api/query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// The user's question.
    pub question: String,

    /// Session to continue; serialized as `null` when absent.
    pub session_id: Option<String>,

    /// Whether the server should record this exchange in the session history.
    pub maintain_history: bool,
}

impl QueryRequest {
    /// Create a request that maintains history.
    pub fn new(question: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            question: question.into(),
            session_id,
            maintain_history: true,
        }
    }

    /// Set whether history should be maintained.
    pub fn with_maintain_history(mut self, maintain_history: bool) -> Self {
        self.maintain_history = maintain_history;
        self
    }
}

/// Body returned by `POST /api/query`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryResponse {
    /// The generated answer.
    pub answer: String,

    /// Session the answer belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Citations backing the answer, in rank order.
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub sources: Vec<Source>,
}

impl QueryResponse {
    /// Create a response with an answer and nothing else.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            session_id: None,
            sources: Vec::new(),
        }
    }

    /// Set the session identifier.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the sources.
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }
}
