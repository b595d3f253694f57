use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of characters of a source excerpt shown before the ellipsis.
pub const SOURCE_EXCERPT_CHARS: usize = 150;

/// Label shown when a source carries no originating-file metadata.
pub const UNKNOWN_SOURCE_LABEL: &str = "Unknown Source";

/// A citation returned alongside an answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Source {
    /// Content excerpt from the source document.
    pub content: String,

    /// Free-form metadata; `source` names the originating file when present.
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub metadata: Map<String, Value>,
}

impl Source {
    /// Create a source with no metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Attach the originating-file label.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.metadata
            .insert("source".to_string(), Value::String(origin.into()));
        self
    }

    /// The originating-file label, falling back to [`UNKNOWN_SOURCE_LABEL`].
    pub fn label(&self) -> &str {
        self.metadata
            .get("source")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SOURCE_LABEL)
    }

    /// The first [`SOURCE_EXCERPT_CHARS`] characters of the content followed by `...`.
    ///
    /// The ellipsis is appended unconditionally, short excerpts included.
    pub fn excerpt(&self) -> String {
        let mut excerpt: String = self.content.chars().take(SOURCE_EXCERPT_CHARS).collect();
        excerpt.push_str("...");
        excerpt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_from_metadata() {
        let source: Source = serde_json::from_value(json!({
            "content": "Rust is a systems programming language.",
            "metadata": {"source": "data/rust.pdf", "page": 3}
        }))
        .unwrap();
        assert_eq!(source.label(), "data/rust.pdf");
    }

    #[test]
    fn label_falls_back_when_missing() {
        let source: Source = serde_json::from_value(json!({"content": "x"})).unwrap();
        assert_eq!(source.label(), UNKNOWN_SOURCE_LABEL);
        let source: Source =
            serde_json::from_value(json!({"content": "x", "metadata": {"page": 1}})).unwrap();
        assert_eq!(source.label(), UNKNOWN_SOURCE_LABEL);
    }

    #[test]
    fn null_metadata_falls_back() {
        let source: Source =
            serde_json::from_str(r#"{"content":"x","metadata":null}"#).unwrap();
        assert!(source.metadata.is_empty());
        assert_eq!(source.label(), UNKNOWN_SOURCE_LABEL);
        let source: Source =
            serde_json::from_str(r#"{"content":"x","metadata":{"source":null}}"#).unwrap();
        assert_eq!(source.label(), UNKNOWN_SOURCE_LABEL);
    }

    #[test]
    fn excerpt_truncates_to_150_chars() {
        let source = Source::new("a".repeat(400));
        let excerpt = source.excerpt();
        assert_eq!(excerpt.len(), 153);
        assert!(excerpt.ends_with("..."));
        assert_eq!(&excerpt[..150], "a".repeat(150));
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let source = Source::new("é".repeat(200));
        let excerpt = source.excerpt();
        assert_eq!(excerpt.chars().count(), 153);
    }

    #[test]
    fn short_excerpt_still_gets_ellipsis() {
        assert_eq!(Source::new("short").excerpt(), "short...");
    }
}
