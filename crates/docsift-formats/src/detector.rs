//! Format detection via priority-ordered keyword rules

use docsift_domain::FormatTag;

/// One detection rule: a format tag and the keywords that identify it.
///
/// A rule matches when *any* of its keywords appears in the uppercased
/// document text. Keywords are stored uppercased so matching is
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct DetectionRule {
    tag: FormatTag,
    keywords: Vec<String>,
}

impl DetectionRule {
    /// Create a rule for `tag` matching any of `keywords`.
    pub fn new<T, I, K>(tag: T, keywords: I) -> Self
    where
        T: Into<FormatTag>,
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        Self {
            tag: tag.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// The tag this rule assigns on match.
    pub fn tag(&self) -> &FormatTag {
        &self.tag
    }

    fn matches(&self, upper_text: &str) -> bool {
        self.keywords.iter().any(|k| upper_text.contains(k))
    }
}

/// Pure classifier: text in, format tag (or nothing) out.
///
/// Rules are evaluated strictly top to bottom and the first match wins,
/// so rule order encodes priority. Detection is deterministic and
/// side-effect-free; partial matches are never combined.
#[derive(Debug, Clone, Default)]
pub struct FormatDetector {
    rules: Vec<DetectionRule>,
}

impl FormatDetector {
    /// Create a detector from a priority-ordered rule list.
    pub fn new(rules: Vec<DetectionRule>) -> Self {
        Self { rules }
    }

    /// Classify extracted text, returning the first matching rule's tag.
    pub fn detect(&self, text: &str) -> Option<FormatTag> {
        let upper = text.to_uppercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&upper))
            .map(|rule| rule.tag().clone())
    }

    /// The rules this detector evaluates, in priority order.
    pub fn rules(&self) -> &[DetectionRule] {
        &self.rules
    }
}
