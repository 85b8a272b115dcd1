//! docsift Processor
//!
//! Runs the full pipeline for exactly one document.
//!
//! # Overview
//!
//! The [`DocumentProcessor`] drives detect → (expected-format check) →
//! extract → validate for a single document and collapses any failure into
//! a uniform [`Outcome`](docsift_domain::Outcome). It is the unit of work
//! both batch orchestrators schedule; it performs no concurrency of its
//! own and treats text extraction as one atomic blocking step.
//!
//! # Architecture
//!
//! ```text
//! Document → TextExtractor → FormatDetector → ExtractorRegistry
//!                → FieldExtractor::extract → FieldExtractor::validate → Outcome
//! ```
//!
//! A document moves `Pending → Detecting → Extracting → Validating →
//! Success`, or transitions to `Failure` from any step. `Failure` is
//! terminal: there are no retries and no re-entry.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use docsift_domain::Document;
//! use docsift_formats::{DetectionRule, ExtractorRegistry, FormatDetector};
//! use docsift_processor::{DocumentProcessor, ProcessOptions, TextExtractionError, TextExtractor};
//!
//! struct Utf8Text;
//!
//! impl TextExtractor for Utf8Text {
//!     fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
//!         Ok(String::from_utf8_lossy(bytes).into_owned())
//!     }
//! }
//!
//! let detector = FormatDetector::new(vec![DetectionRule::new("CRT", ["TECHNICAL REVIEW"])]);
//! let registry = Arc::new(ExtractorRegistry::new());
//! let processor = DocumentProcessor::new(detector, registry, Arc::new(Utf8Text));
//!
//! // No extractor registered for CRT, so this collapses into a Failure.
//! let doc = Document::new("r.pdf", b"Technical Review 2026".to_vec());
//! let outcome = processor.process(&doc, &ProcessOptions::default());
//! assert!(outcome.is_failure());
//! ```

#![warn(missing_docs)]

mod error;
mod processor;
mod text;


pub use error::ProcessError;
pub use processor::{DocumentProcessor, ProcessOptions};
pub use text::{TextExtractionError, TextExtractor};
