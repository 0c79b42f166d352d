use std::collections::{HashMap, HashSet};
use log::{debug, warn};

use crate::errors::HarmonizationError;
use crate::providers::Translator;
use crate::strings_file::{StringsDocument, StringsEntry};

// @module: Merge, cleanup and backfill operations over parsed strings documents

// @struct: Flags controlling one incremental merge
#[derive(Debug, Clone)]
pub struct UpdatePolicy {
    // @field: New keys get an empty value instead of the key itself
    pub add_new_values_as_empty: bool,

    // @field: Replace values of keys present in both documents
    pub override_values: bool,

    // @field: Keep keys that are absent from the merge source (additive)
    pub keep_existing_keys: bool,

    // @field: Replace comments of keys present in both documents
    pub override_comments: bool,

    // @field: Never overwrite an existing value with an empty source value
    pub ignore_empty_values: bool,

    // @field: Reorder entries by ascending key as a final step
    pub sort_by_keys: bool,

    // @field: Render with original whitespace preserved (consumed by the writer)
    pub keep_whitespace_surroundings: bool,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        UpdatePolicy {
            add_new_values_as_empty: true,
            override_values: false,
            keep_existing_keys: false,
            override_comments: false,
            ignore_empty_values: false,
            sort_by_keys: false,
            keep_whitespace_surroundings: false,
        }
    }
}

// @struct: Counts of what one merge actually changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStats {
    // @field: Entries appended for keys new to the document
    pub added: usize,

    // @field: Entries whose value or comment changed
    pub updated: usize,

    // @field: Entries dropped for keys missing from the source
    pub removed: usize,
}

impl UpdateStats {
    /// Whether the merge left the document untouched
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.updated == 0 && self.removed == 0
    }
}

/// Stateless operations over parsed strings documents
pub struct UpdateEngine;

impl UpdateEngine {
    /// Merge freshly extracted keys into an existing document.
    ///
    /// The source text is parsed as a second document; for duplicated source
    /// keys the first occurrence wins. Retained entries keep their document
    /// order and surrounding formatting, new keys are appended in source
    /// order, and removals only happen when the policy is non-additive.
    pub fn incrementally_update_keys(
        document: &mut StringsDocument,
        source_text: &str,
        policy: &UpdatePolicy,
    ) -> UpdateStats {
        let source = StringsDocument::from_text(source_text);
        let mut stats = UpdateStats::default();

        let mut source_by_key: HashMap<&str, &StringsEntry> = HashMap::new();
        for entry in &source.entries {
            source_by_key.entry(entry.key.as_str()).or_insert(entry);
        }

        let existing_keys: HashSet<String> = document
            .entries
            .iter()
            .map(|entry| entry.key.clone())
            .collect();

        // Update or drop the entries the document already has
        document.entries.retain_mut(|entry| {
            let source_entry = match source_by_key.get(entry.key.as_str()) {
                Some(source_entry) => *source_entry,
                None => {
                    if policy.keep_existing_keys {
                        return true;
                    }
                    stats.removed += 1;
                    return false;
                }
            };

            let mut changed = false;

            let suppressed = policy.ignore_empty_values && source_entry.value.is_empty();
            if policy.override_values && !suppressed && entry.value != source_entry.value {
                entry.value = source_entry.value.clone();
                changed = true;
            }

            if policy.override_comments && entry.comment != source_entry.comment {
                entry.comment = source_entry.comment.clone();
                entry.raw_comment_block = source_entry.raw_comment_block.clone();
                changed = true;
            }

            if changed {
                stats.updated += 1;
            }
            true
        });

        // Append keys the document does not have yet, in source order
        let mut appended: HashSet<&str> = HashSet::new();
        for source_entry in &source.entries {
            if existing_keys.contains(source_entry.key.as_str()) {
                continue;
            }
            if !appended.insert(source_entry.key.as_str()) {
                continue;
            }

            let value = if policy.add_new_values_as_empty {
                String::new()
            } else {
                source_entry.key.clone()
            };

            let mut entry = StringsEntry::new(source_entry.key.clone(), value);
            entry.comment = source_entry.comment.clone();
            entry.raw_comment_block = source_entry.raw_comment_block.clone();
            if !document.entries.is_empty() {
                entry.leading_whitespace = "\n".to_string();
            }

            document.entries.push(entry);
            stats.added += 1;
        }

        if policy.sort_by_keys {
            Self::sort_by_keys(document);
        }

        debug!(
            "Merged keys: {} added, {} updated, {} removed",
            stats.added, stats.updated, stats.removed
        );
        stats
    }

    /// Align a document's key set with the source locale's document.
    ///
    /// Keys that match a source key apart from casing are rewritten to the
    /// source spelling with their value and comment preserved. Keys without
    /// any source counterpart are removed, and source keys missing here are
    /// appended with an empty value and the source's comment.
    pub fn harmonize_keys(
        document: &mut StringsDocument,
        source_text: &str,
    ) -> Result<(), HarmonizationError> {
        let source = StringsDocument::from_text(source_text);

        // An empty source would wipe the whole document; treat it as unusable
        if source.entries.is_empty() {
            return Err(HarmonizationError::NoEntries);
        }

        let mut source_by_folded: HashMap<String, &StringsEntry> = HashMap::new();
        for entry in &source.entries {
            source_by_folded
                .entry(entry.key.to_lowercase())
                .or_insert(entry);
        }

        let mut renamed = 0usize;
        let mut removed = 0usize;

        document.entries.retain_mut(|entry| {
            match source_by_folded.get(&entry.key.to_lowercase()) {
                Some(source_entry) => {
                    if entry.key != source_entry.key {
                        entry.key = source_entry.key.clone();
                        renamed += 1;
                    }
                    true
                }
                None => {
                    removed += 1;
                    false
                }
            }
        });

        let mut present: HashSet<String> = document
            .entries
            .iter()
            .map(|entry| entry.key.to_lowercase())
            .collect();

        let mut added = 0usize;
        for source_entry in &source.entries {
            if !present.insert(source_entry.key.to_lowercase()) {
                continue;
            }

            let mut entry = StringsEntry::new(source_entry.key.clone(), String::new());
            entry.comment = source_entry.comment.clone();
            entry.raw_comment_block = source_entry.raw_comment_block.clone();
            if !document.entries.is_empty() {
                entry.leading_whitespace = "\n".to_string();
            }

            document.entries.push(entry);
            added += 1;
        }

        debug!(
            "Harmonized keys: {} renamed, {} removed, {} added",
            renamed, removed, added
        );
        Ok(())
    }

    /// Drop every entry after the first one sharing its key.
    ///
    /// Returns the number of entries removed.
    pub fn prevent_duplicate_entries(document: &mut StringsDocument) -> usize {
        let before = document.entries.len();
        let mut seen: HashSet<String> = HashSet::new();
        document.entries.retain(|entry| seen.insert(entry.key.clone()));
        before - document.entries.len()
    }

    /// Reorder all entries by ascending key, bytewise.
    ///
    /// The sort is stable, so duplicated keys keep their relative order.
    pub fn sort_by_keys(document: &mut StringsDocument) {
        document.entries.sort_by(|a, b| a.key.cmp(&b.key));
    }

    /// Fill empty values with machine translations of the reference values.
    ///
    /// Only entries whose key has a non-empty value in the reference document
    /// are considered; with `override_existing` every such entry is
    /// re-translated, otherwise only the empty-valued ones. A failed request
    /// logs a warning and leaves that entry untouched. Returns the number of
    /// entries whose value actually changed.
    pub async fn translate_empty_values(
        document: &mut StringsDocument,
        reference_text: &str,
        target_locale: &str,
        translator: &dyn Translator,
        override_existing: bool,
    ) -> usize {
        let reference = StringsDocument::from_text(reference_text);

        let mut reference_by_key: HashMap<&str, &str> = HashMap::new();
        for entry in &reference.entries {
            reference_by_key
                .entry(entry.key.as_str())
                .or_insert(entry.value.as_str());
        }

        let mut translated_count = 0usize;

        for entry in &mut document.entries {
            if !entry.value.is_empty() && !override_existing {
                continue;
            }

            let reference_value = match reference_by_key.get(entry.key.as_str()) {
                Some(value) if !value.is_empty() => *value,
                _ => continue,
            };

            match translator.translate(reference_value, target_locale).await {
                Ok(translated) => {
                    if translated != entry.value {
                        entry.value = translated;
                        translated_count += 1;
                    }
                }
                Err(e) => {
                    warn!(
                        "Failed to translate '{}' to {}: {}",
                        entry.key, target_locale, e
                    );
                }
            }
        }

        translated_count
    }
}
