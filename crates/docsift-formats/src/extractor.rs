//! The per-format extraction capability trait

use crate::ExtractorError;
use docsift_domain::{ExtractedFields, Fields};

/// A pluggable per-format capability pair: extract fields from text, then
/// validate the extracted fields.
///
/// Implementations are registered in an
/// [`ExtractorRegistry`](crate::ExtractorRegistry) keyed by format tag and
/// shared immutably across concurrent pipeline invocations, so they must be
/// `Send + Sync` and keep no per-call mutable state.
pub trait FieldExtractor: Send + Sync {
    /// Extract fields from the document's text.
    ///
    /// When `capture_diagnostics` is true, implementations that can report
    /// how they matched (e.g. the patterns they applied) should populate
    /// [`ExtractedFields::diagnostics`]; others may ignore the flag.
    fn extract(
        &self,
        text: &str,
        capture_diagnostics: bool,
    ) -> Result<ExtractedFields, ExtractorError>;

    /// Validate the extracted fields for one document.
    ///
    /// `document_name` is provided so error messages can name the offending
    /// document.
    fn validate(&self, fields: &Fields, document_name: &str) -> Result<(), ExtractorError>;
}
