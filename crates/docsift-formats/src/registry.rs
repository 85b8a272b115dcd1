//! Extractor registry: format tag → extraction capability

use crate::FieldExtractor;
use docsift_domain::FormatTag;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Closed registry mapping format tags to their extractors.
///
/// The registry is built once at startup, then shared immutably
/// (`Arc<ExtractorRegistry>`) across every concurrent pipeline invocation.
/// Workers resolve an extractor per call and borrow it for the duration of
/// that call; the registry remains the sole owner.
#[derive(Default)]
pub struct ExtractorRegistry {
    entries: HashMap<FormatTag, Arc<dyn FieldExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor for a format tag, replacing any previous one.
    pub fn register(
        &mut self,
        tag: impl Into<FormatTag>,
        extractor: Arc<dyn FieldExtractor>,
    ) -> &mut Self {
        let tag = tag.into();
        debug!(format = %tag, "registering extractor");
        self.entries.insert(tag, extractor);
        self
    }

    /// Builder-style registration for constructing a registry inline.
    pub fn with(mut self, tag: impl Into<FormatTag>, extractor: Arc<dyn FieldExtractor>) -> Self {
        self.register(tag, extractor);
        self
    }

    /// Resolve the extractor for a format tag, if one is registered.
    pub fn resolve(&self, tag: &FormatTag) -> Option<Arc<dyn FieldExtractor>> {
        self.entries.get(tag).cloned()
    }

    /// Tags with a registered extractor, in no particular order.
    pub fn formats(&self) -> Vec<&FormatTag> {
        self.entries.keys().collect()
    }

    /// Number of registered extractors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no extractors at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("formats", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
