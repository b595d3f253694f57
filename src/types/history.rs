use serde::{Deserialize, Serialize};

/// A single question/answer exchange recorded by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    /// The user's question.
    pub question: String,
    /// The assistant's answer.
    pub answer: String,
}

impl HistoryItem {
    /// Create a history item.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Body returned by `GET /api/history/{session_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryResponse {
    /// Exchanges in the order they happened.
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub history: Vec<HistoryItem>,

    /// Session the history belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}
