//! Per-document error taxonomy
//!
//! Every variant converts to exactly one Failure outcome for its document;
//! none of them is fatal to a batch.

use crate::TextExtractionError;
use docsift_formats::ExtractorError;
use docsift_domain::FormatTag;
use thiserror::Error;

/// Errors that can occur while processing a single document.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The detected format differs from the format the caller expected.
    ///
    /// The `detected format:` fragment at the end of the message is the
    /// marker the result aggregator rewrites for highlighting.
    #[error("document {document} does not match the expected format ({expected}); detected format: {detected}")]
    FormatMismatch {
        /// Name of the offending document
        document: String,
        /// Format the caller declared
        expected: FormatTag,
        /// Format the detector actually assigned (or `UNKNOWN`)
        detected: String,
    },

    /// No extractor resolves for the detected (or undetected) format
    #[error("document {document} could not be identified as a supported format")]
    UnknownFormat {
        /// Name of the offending document
        document: String,
    },

    /// The underlying text extraction failed
    #[error(transparent)]
    Text(#[from] TextExtractionError),

    /// Field extraction failed
    #[error(transparent)]
    Extraction(ExtractorError),

    /// Extracted fields failed required-field or pattern checks
    #[error(transparent)]
    Validation(ExtractorError),
}
