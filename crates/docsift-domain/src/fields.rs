//! Insertion-ordered field map produced by extractors

use std::fmt;

/// An insertion-ordered key→value map of extracted fields.
///
/// Extractors emit fields in a meaningful order (the order they appear in
/// the source document or in the extraction rules), and downstream
/// consumers render them in that order, so a plain `Vec` of pairs is the
/// representation rather than a hash map.
///
/// # Examples
///
/// ```
/// use docsift_domain::Fields;
///
/// let mut fields = Fields::new();
/// fields.insert("plate", "ABCD-12");
/// fields.insert("owner", "Jane Doe");
///
/// assert_eq!(fields.get("plate"), Some("ABCD-12"));
/// assert_eq!(fields.len(), 2);
/// let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
/// assert_eq!(keys, ["plate", "owner"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing the value if the key already exists.
    ///
    /// Replacement keeps the key's original position so the emission order
    /// stays stable.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a field value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, String)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        Ok(())
    }
}
