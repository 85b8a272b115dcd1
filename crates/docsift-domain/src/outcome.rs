//! Outcome module - the terminal per-document result

use crate::Fields;

/// What an extractor produced for one document, before it is wrapped into
/// an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedFields {
    /// Extracted fields in emission order.
    pub fields: Fields,

    /// Optional document title (some formats carry a heading worth keeping).
    pub title: Option<String>,

    /// Optional diagnostic map (e.g. the patterns an extractor applied),
    /// populated only when the caller asked for diagnostics.
    pub diagnostics: Option<Fields>,
}

impl ExtractedFields {
    /// Wrap a plain field map with no title and no diagnostics.
    pub fn from_fields(fields: Fields) -> Self {
        Self {
            fields,
            title: None,
            diagnostics: None,
        }
    }
}

/// The payload of a successful document outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentData {
    /// Name of the source document.
    pub name: String,

    /// Extracted fields in emission order.
    pub fields: Fields,

    /// Optional document title.
    pub title: Option<String>,

    /// Optional diagnostic map.
    pub diagnostics: Option<Fields>,
}

/// The payload of a failed document outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// Name of the source document.
    pub name: String,

    /// Human-readable failure message.
    pub error: String,
}

/// Terminal result for one document: exactly one of success or failure.
///
/// Every document submitted to the pipeline yields exactly one `Outcome`,
/// never zero or two, and an `Outcome` is immutable once created. Failures
/// are final; the pipeline never retries a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The document was detected, extracted, and validated.
    Success(DocumentData),

    /// Some step of the pipeline failed for this document.
    Failure(DocumentFailure),
}

impl Outcome {
    /// Build a success outcome from a document name and extraction output.
    pub fn success(name: impl Into<String>, extracted: ExtractedFields) -> Self {
        Outcome::Success(DocumentData {
            name: name.into(),
            fields: extracted.fields,
            title: extracted.title,
            diagnostics: extracted.diagnostics,
        })
    }

    /// Build a failure outcome from a document name and an error message.
    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Outcome::Failure(DocumentFailure {
            name: name.into(),
            error: error.into(),
        })
    }

    /// Name of the document this outcome belongs to.
    pub fn name(&self) -> &str {
        match self {
            Outcome::Success(data) => &data.name,
            Outcome::Failure(failure) => &failure.name,
        }
    }

    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Whether this outcome is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }
}
