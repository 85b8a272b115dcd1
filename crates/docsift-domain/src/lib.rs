//! docsift Domain Layer
//!
//! This crate contains the core value types shared by every other docsift
//! layer. It has ZERO external dependencies and defines the fundamental
//! concepts the pipeline moves around.
//!
//! ## Key Concepts
//!
//! - **Document**: an opaque named byte buffer owned by the caller
//! - **FormatTag**: the identifier a detector assigns to a document's format
//! - **Fields**: an insertion-ordered key→value map of extracted fields
//! - **Outcome**: the terminal success-or-failure result for one document,
//!   produced exactly once per input
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types only
//! - Collaborator traits live next to their error types in the crates that
//!   consume them (`docsift-formats`, `docsift-processor`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod fields;
pub mod format;
pub mod outcome;

// Re-exports for convenience
pub use document::Document;
pub use fields::Fields;
pub use format::FormatTag;
pub use outcome::{DocumentData, DocumentFailure, ExtractedFields, Outcome};
