// Public modules
pub mod history;
pub mod ingest;
pub mod query;
pub mod source;
pub mod status;

use serde::{Deserialize, Deserializer};

// Re-exports
pub use history::{HistoryItem, HistoryResponse};
pub use ingest::{IngestRequest, IngestResponse};
pub use query::{QueryRequest, QueryResponse};
pub use source::{SOURCE_EXCERPT_CHARS, Source, UNKNOWN_SOURCE_LABEL};
pub use status::{ONLINE, StatusResponse};

/// Deserialize a field that the server may send as `null`, mapping `null` to the default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
