//! Document module - the opaque input unit of a batch

/// An input document: a caller-supplied name plus an opaque byte buffer.
///
/// Documents are input-only. The pipeline reads the bytes, never mutates
/// them, and identifies the document by its name in every result and
/// progress event it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    bytes: Vec<u8>,
}

impl Document {
    /// Create a document from a name and its raw contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsift_domain::Document;
    ///
    /// let doc = Document::new("invoice_001.pdf", b"%PDF-1.7 ...".to_vec());
    /// assert_eq!(doc.name(), "invoice_001.pdf");
    /// ```
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// The caller-supplied document name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw document contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the document in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the document has no content at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
