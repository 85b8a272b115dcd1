//! Format tag - the identifier a detector assigns to a document's format

use std::fmt;

/// Identifier for a document format, e.g. `"CRT"` or `"SOAP"`.
///
/// Tags are opaque to the pipeline: the detector produces them and the
/// extractor registry resolves them. Comparison is exact and
/// case-sensitive; detection rules are responsible for normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatTag(String);

impl FormatTag {
    /// Create a tag from any string-like value.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FormatTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FormatTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_compare_by_value() {
        assert_eq!(FormatTag::from("CRT"), FormatTag::new("CRT"));
        assert_ne!(FormatTag::from("CRT"), FormatTag::from("crt"));
    }

    #[test]
    fn displays_as_plain_string() {
        assert_eq!(FormatTag::from("SOAP").to_string(), "SOAP");
    }
}
