//! Clipboard snapshots — every readable representation at one moment.

use serde::ser::{Serialize, Serializer};

/// Content keyed by format name or raw identifier, in enumeration order.
///
/// Rebuilt on every read; entries may mix two clipboard generations if
/// another process writes while the snapshot is being collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    entries: Vec<(String, String)>,
}

impl ClipboardSnapshot {
    pub(crate) fn push(&mut self, key: String, content: String) {
        self.entries.push((key, content));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, content)| content.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, content)| (k.as_str(), content.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ClipboardSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClipboardSnapshot {
        let mut snapshot = ClipboardSnapshot::default();
        snapshot.push("text".into(), "this is good!".into());
        snapshot.push("html".into(), "this is <strong>good</strong>!".into());
        snapshot
    }

    #[test]
    fn lookup_by_key() {
        let snapshot = sample();
        assert_eq!(snapshot.get("text"), Some("this is good!"));
        assert!(snapshot.contains_key("html"));
        assert_eq!(snapshot.get("rtf"), None);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn keys_keep_enumeration_order() {
        let snapshot = sample();
        let keys: Vec<&str> = snapshot.keys().collect();
        assert_eq!(keys, vec!["text", "html"]);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"text":"this is good!","html":"this is <strong>good</strong>!"}"#
        );
    }

    #[test]
    fn empty_snapshot_serializes_as_empty_object() {
        let snapshot = ClipboardSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), "{}");
    }
}
