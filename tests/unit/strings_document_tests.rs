/*!
 * Tests for document queries and lookups
 */

use locsmith::strings_file::{StringsDocument, StringsEntry};

/// Test duplicate detection with repeated keys
#[test]
fn test_find_duplicate_entries_withRepeatedKeys_shouldGroupThem() {
    let document =
        StringsDocument::from_text("\"a\" = \"1\";\n\"b\" = \"x\";\n\"a\" = \"2\";\n");

    let duplicates = document.find_duplicate_entries();

    assert_eq!(duplicates.len(), 1);
    let group = duplicates.get("a").unwrap();
    assert_eq!(group.len(), 2);
    assert_eq!(group[0].value, "1");
    assert_eq!(group[1].value, "2");
}

/// Test duplicate detection when every key is unique
#[test]
fn test_find_duplicate_entries_withUniqueKeys_shouldReturnEmpty() {
    let document = StringsDocument::from_text("\"a\" = \"1\";\n\"b\" = \"2\";\n");

    assert!(document.find_duplicate_entries().is_empty());
}

/// Test empty value detection in a mixed document
#[test]
fn test_find_empty_value_entries_withMixedValues_shouldReturnOnlyEmptyOnes() {
    let document = StringsDocument::from_text(
        "\"filled\" = \"Value\";\n\"empty_one\" = \"\";\n\"empty_two\" = \"\";\n",
    );

    let empty_entries = document.find_empty_value_entries();

    assert_eq!(empty_entries.len(), 2);
    assert_eq!(empty_entries[0].key, "empty_one");
    assert_eq!(empty_entries[1].key, "empty_two");
}

/// Test that entry lookup returns the first occurrence of a duplicated key
#[test]
fn test_entry_for_key_withDuplicates_shouldReturnFirstOccurrence() {
    let document = StringsDocument::from_text("\"a\" = \"first\";\n\"a\" = \"second\";\n");

    let entry = document.entry_for_key("a").unwrap();
    assert_eq!(entry.value, "first");

    assert!(document.entry_for_key("missing").is_none());
}

/// Test that the key index lists positions in document order
#[test]
fn test_index_withDuplicates_shouldListPositionsInOrder() {
    let document =
        StringsDocument::from_text("\"a\" = \"1\";\n\"b\" = \"2\";\n\"a\" = \"3\";\n");

    let index = document.index();

    assert_eq!(index.get("a"), Some(&vec![0, 2]));
    assert_eq!(index.get("b"), Some(&vec![1]));
    assert_eq!(index.get("c"), None);
}

/// Test the empty value marker on handmade entries
#[test]
fn test_has_empty_value_withHandmadeEntries_shouldMatchValueState() {
    assert!(StringsEntry::new("key", "").has_empty_value());
    assert!(!StringsEntry::new("key", "value").has_empty_value());
}

/// Test that the canonical key/value line escapes its content
#[test]
fn test_key_value_line_withSpecialCharacters_shouldEscapeThem() {
    let entry = StringsEntry::new("say", "He said \"hi\"\non two lines");

    assert_eq!(
        entry.key_value_line(),
        "\"say\" = \"He said \\\"hi\\\"\\non two lines\";"
    );
}
