//! Single-document pipeline implementation

use crate::{ProcessError, TextExtractor};
use docsift_domain::{Document, ExtractedFields, FormatTag, Outcome};
use docsift_formats::{ExtractorRegistry, FormatDetector};
use std::sync::Arc;
use tracing::{debug, error};

/// Placeholder tag text used in mismatch messages when no rule matched.
const UNKNOWN_FORMAT: &str = "UNKNOWN";

/// Per-call options for document processing.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Format the caller expects every document to have. When set, a
    /// document detected as anything else fails with a format mismatch.
    pub expected_format: Option<FormatTag>,

    /// Ask extractors to report how they matched (pattern diagnostics).
    pub capture_diagnostics: bool,
}

/// Runs detect → extract → validate for one document.
///
/// The processor holds its collaborators (text extraction service, format
/// detector, extractor registry) and is shared immutably across every
/// concurrent unit of work in a batch. It is internally sequential and
/// synchronous: orchestrators decide where and how it runs.
pub struct DocumentProcessor {
    detector: FormatDetector,
    registry: Arc<ExtractorRegistry>,
    text: Arc<dyn TextExtractor>,
}

impl DocumentProcessor {
    /// Create a processor from its collaborators.
    pub fn new(
        detector: FormatDetector,
        registry: Arc<ExtractorRegistry>,
        text: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            detector,
            registry,
            text,
        }
    }

    /// The registry this processor resolves extractors from.
    pub fn registry(&self) -> &Arc<ExtractorRegistry> {
        &self.registry
    }

    /// Process one document, collapsing any failure into a uniform
    /// [`Outcome`].
    ///
    /// This never returns an error: per-document failures are data, not
    /// control flow, so sibling documents in a batch are unaffected.
    pub fn process(&self, document: &Document, options: &ProcessOptions) -> Outcome {
        match self.run(document, options) {
            Ok(extracted) => {
                debug!(
                    document = %document.name(),
                    fields = extracted.fields.len(),
                    "document processed"
                );
                Outcome::success(document.name(), extracted)
            }
            Err(err) => {
                error!(document = %document.name(), %err, "document processing failed");
                Outcome::failure(document.name(), err.to_string())
            }
        }
    }

    fn run(
        &self,
        document: &Document,
        options: &ProcessOptions,
    ) -> Result<ExtractedFields, ProcessError> {
        let text = self.text.extract_text(document.bytes())?;

        let detected = self.detector.detect(&text);

        if let Some(expected) = &options.expected_format {
            if detected.as_ref() != Some(expected) {
                return Err(ProcessError::FormatMismatch {
                    document: document.name().to_string(),
                    expected: expected.clone(),
                    detected: detected
                        .map(|tag| tag.to_string())
                        .unwrap_or_else(|| UNKNOWN_FORMAT.to_string()),
                });
            }
        }

        let format = detected.ok_or_else(|| ProcessError::UnknownFormat {
            document: document.name().to_string(),
        })?;

        let extractor = self
            .registry
            .resolve(&format)
            .ok_or_else(|| ProcessError::UnknownFormat {
                document: document.name().to_string(),
            })?;

        let extracted = extractor
            .extract(&text, options.capture_diagnostics)
            .map_err(ProcessError::Extraction)?;

        extractor
            .validate(&extracted.fields, document.name())
            .map_err(ProcessError::Validation)?;

        Ok(extracted)
    }
}
