//! Write requests — the full set of representations for one write.

use crate::registry::{self, FormatName, TypeIdentifier};

/// Representations to post in a single write, in declaration order.
///
/// Keys are resolved through the registry on insert. Two keys that
/// resolve to the same identifier (`text` and
/// `public.utf8-plain-text`) share one slot: the later content wins,
/// the earlier position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteRequest {
    entries: Vec<(TypeIdentifier, String)>,
}

impl WriteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the representation for `format`.
    pub fn insert(&mut self, format: impl Into<FormatName>, content: impl Into<String>) {
        let type_id = registry::to_type_identifier(&format.into());
        let content = content.into();
        match self.entries.iter().position(|(id, _)| *id == type_id) {
            Some(i) => self.entries[i].1 = content,
            None => self.entries.push((type_id, content)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, format: impl Into<FormatName>, content: impl Into<String>) -> Self {
        self.insert(format, content);
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.with(FormatName::Text, content)
    }

    pub fn html(self, content: impl Into<String>) -> Self {
        self.with(FormatName::Html, content)
    }

    pub fn rtf(self, content: impl Into<String>) -> Self {
        self.with(FormatName::Rtf, content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolved identifiers, in declaration order.
    pub fn type_ids(&self) -> impl Iterator<Item = &TypeIdentifier> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeIdentifier, &str)> {
        self.entries.iter().map(|(id, content)| (id, content.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for WriteRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (format, content) in iter {
            request.insert(FormatName::parse(format.as_ref()), content);
        }
        request
    }
}
