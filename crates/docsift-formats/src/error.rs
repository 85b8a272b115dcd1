//! Error types for field extraction and validation

use thiserror::Error;

/// Errors an extractor can raise while extracting or validating fields.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Field extraction failed outright
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// A required field was not found in the document text
    #[error("required field `{field}` is missing in {document}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Name of the document being validated
        document: String,
    },

    /// A field was found but its value failed a pattern or range check
    #[error("field `{field}` in {document} is invalid: {reason}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// Name of the document being validated
        document: String,
        /// What was wrong with the value
        reason: String,
    },
}
