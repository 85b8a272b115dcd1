//! Text extraction collaborator contract

use thiserror::Error;

/// Errors the text-extraction service distinguishes.
#[derive(Debug, Error)]
pub enum TextExtractionError {
    /// The document decoded but contains no extractable text
    #[error("document contains no extractable text")]
    Empty,

    /// The document could not be decoded at all
    #[error("document is corrupt or unreadable: {0}")]
    Corrupt(String),
}

/// Collaborator contract for turning document bytes into text.
///
/// The pipeline treats this as one opaque blocking operation; callers plug
/// in whatever extraction library they use. Implementations are shared
/// across concurrent pipeline invocations and must be `Send + Sync`.
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of a document.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError>;
}
