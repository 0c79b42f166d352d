use std::collections::HashMap;
use std::fmt;

use super::model::StringsEntry;
use super::{parser, writer};

/// Parsed, ordered representation of one .strings document.
///
/// Mutated in place by the update operations and consumed by the writer;
/// rebuilt from text on every run, never persisted.
#[derive(Debug, Clone, Default)]
pub struct StringsDocument {
    /// Entries in document order
    pub entries: Vec<StringsEntry>,

    /// Verbatim content after the last entry
    pub tail: String,
}

impl StringsDocument {
    /// Create an empty document
    pub fn new() -> Self {
        StringsDocument {
            entries: Vec::new(),
            tail: String::new(),
        }
    }

    /// Parse document text, keeping malformed lines as opaque content
    pub fn from_text(text: &str) -> Self {
        parser::parse(text)
    }

    /// Lookup from key to entry positions, positions in document order.
    ///
    /// Computed from `entries` on demand so it can never run stale while
    /// operations reorder or remove entries. A key maps to more than one
    /// position until duplicates have been cleaned up.
    pub fn index(&self) -> HashMap<String, Vec<usize>> {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, entry) in self.entries.iter().enumerate() {
            index.entry(entry.key.clone()).or_default().push(position);
        }
        index
    }

    /// First entry carrying the given key, if any
    pub fn entry_for_key(&self, key: &str) -> Option<&StringsEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Group entries sharing a key, keeping only keys with more than one
    /// entry; entries inside each group stay in document order
    pub fn find_duplicate_entries(&self) -> HashMap<String, Vec<StringsEntry>> {
        let mut groups: HashMap<String, Vec<StringsEntry>> = HashMap::new();
        for entry in &self.entries {
            groups.entry(entry.key.clone()).or_default().push(entry.clone());
        }
        groups.retain(|_, group| group.len() > 1);
        groups
    }

    /// Entries whose value is still empty, in document order
    pub fn find_empty_value_entries(&self) -> Vec<StringsEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.has_empty_value())
            .cloned()
            .collect()
    }

    /// Render the document back to text.
    ///
    /// With `keep_whitespace_surroundings` the captured whitespace, raw
    /// comment blocks and opaque content are reproduced verbatim; without it
    /// the canonical stripped form is emitted.
    pub fn render(&self, keep_whitespace_surroundings: bool) -> String {
        writer::render(self, keep_whitespace_surroundings)
    }
}

impl fmt::Display for StringsDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Strings Document")?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        writeln!(f, "Empty values: {}", self.find_empty_value_entries().len())?;
        Ok(())
    }
}
