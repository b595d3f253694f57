use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Body of `POST /api/ingest`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestRequest {
    /// File or directory on the server to ingest.
    pub path: String,
}

impl IngestRequest {
    /// Create an ingestion request for a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Body returned by `POST /api/ingest` and `POST /api/upload`.
///
/// A 2xx response may still report `success: false`; the client treats that
/// as a rejection carrying `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestResponse {
    /// Whether the operation succeeded.
    pub success: bool,

    /// Server-supplied details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number of document chunks that were added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_processed: Option<u64>,
}

impl IngestResponse {
    /// Create a successful response.
    pub fn succeeded(documents_processed: u64) -> Self {
        Self {
            success: true,
            message: None,
            documents_processed: Some(documents_processed),
        }
    }

    /// Create an unsuccessful response with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            documents_processed: None,
        }
    }

    /// Converts `success: false` into [`Error::Rejected`].
    ///
    /// The server's message is used when present, `fallback` otherwise.
    pub fn ensure_success(self, fallback: &str) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::rejected(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_body() {
        let response: IngestResponse = serde_json::from_value(json!({
            "success": true,
            "message": "Successfully ingested 42 document chunks",
            "documents_processed": 42
        }))
        .unwrap();
        assert!(response.success);
        assert_eq!(response.documents_processed, Some(42));
    }

    #[test]
    fn failure_body_without_count() {
        let response: IngestResponse =
            serde_json::from_value(json!({"success": false, "message": "nope"})).unwrap();
        assert_eq!(response, IngestResponse::failed("nope"));
    }

    #[test]
    fn ensure_success_maps_rejection() {
        let err = IngestResponse::failed("No documents found or processed")
            .ensure_success("Ingestion failed")
            .unwrap_err();
        assert!(err.is_rejected());
        assert_eq!(err.message(), "No documents found or processed");

        let err = IngestResponse::default()
            .ensure_success("Ingestion failed")
            .unwrap_err();
        assert_eq!(err.message(), "Ingestion failed");

        let ok = IngestResponse::succeeded(3)
            .ensure_success("Ingestion failed")
            .unwrap();
        assert_eq!(ok.documents_processed, Some(3));
    }
}
