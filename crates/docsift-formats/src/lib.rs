//! docsift Formats
//!
//! Format detection and extractor resolution.
//!
//! # Overview
//!
//! This crate answers two questions for the pipeline:
//!
//! 1. *What format is this document?* — [`FormatDetector`] walks a
//!    priority-ordered list of keyword rules over the extracted text and
//!    returns the first matching [`FormatTag`](docsift_domain::FormatTag).
//! 2. *Who extracts this format?* — [`ExtractorRegistry`] maps a tag to a
//!    registered [`FieldExtractor`], the capability pair
//!    (`extract` + `validate`) a format plugs into the pipeline.
//!
//! The pipeline never hardcodes extraction rules; callers register an
//! extractor per format and the registry is the single lookup point.
//!
//! # Example
//!
//! ```
//! use docsift_formats::{DetectionRule, ExtractorRegistry, FormatDetector};
//!
//! let detector = FormatDetector::new(vec![
//!     DetectionRule::new("INVOICE", ["TAX INVOICE", "INVOICE NO"]),
//!     DetectionRule::new("RECEIPT", ["RECEIPT"]),
//! ]);
//!
//! assert_eq!(
//!     detector.detect("Tax Invoice no. 42").map(|t| t.to_string()),
//!     Some("INVOICE".to_string()),
//! );
//! assert!(detector.detect("something else entirely").is_none());
//! # let _ = ExtractorRegistry::new();
//! ```

#![warn(missing_docs)]

mod detector;
mod error;
mod extractor;
mod registry;

pub use detector::{DetectionRule, FormatDetector};
pub use error::ExtractorError;
pub use extractor::FieldExtractor;
pub use registry::ExtractorRegistry;
