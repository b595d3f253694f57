//! The seam between the chat controller and the question-answering service.

use crate::error::Result;
use crate::types::{
    HistoryResponse, IngestRequest, IngestResponse, QueryRequest, QueryResponse, StatusResponse,
};

/// Operations the chat controller needs from the service.
///
/// Implementations return `Err` for transport failures and non-2xx statuses.
/// Business-logic failures (`success: false`) are returned as successful
/// [`IngestResponse`] values and judged by the caller.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/status`.
    async fn status(&self) -> Result<StatusResponse>;

    /// `POST /api/query`.
    async fn query(&self, request: QueryRequest) -> Result<QueryResponse>;

    /// `GET /api/history/{session_id}`.
    async fn history(&self, session_id: &str) -> Result<HistoryResponse>;

    /// `DELETE /api/history/{session_id}`.
    async fn clear_history(&self, session_id: &str) -> Result<()>;

    /// `DELETE /api/session/{session_id}`.
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// `POST /api/ingest`.
    async fn ingest(&self, request: IngestRequest) -> Result<IngestResponse>;

    /// `POST /api/upload` with the file sent as multipart field `file`.
    async fn upload(&self, file_name: &str, contents: Vec<u8>) -> Result<IngestResponse>;
}
