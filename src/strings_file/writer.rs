use super::document::StringsDocument;

// @module: Rendering of documents back to .strings text

/// Render a document to text, either verbatim or in canonical form.
///
/// Deterministic: the same document and mode always produce byte-identical
/// output, and unstripped rendering of a freshly parsed render result
/// reproduces it exactly.
pub fn render(document: &StringsDocument, keep_whitespace_surroundings: bool) -> String {
    if keep_whitespace_surroundings {
        render_unstripped(document)
    } else {
        render_stripped(document)
    }
}

/// Verbatim mode: captured whitespace, raw comment blocks and opaque
/// content come back byte for byte; only the key/value line itself is
/// re-emitted canonically.
fn render_unstripped(document: &StringsDocument) -> String {
    let mut output = String::new();

    for entry in &document.entries {
        output.push_str(&entry.leading_whitespace);

        if let Some(raw) = &entry.raw_comment_block {
            output.push_str(raw);
        } else if let Some(comment) = &entry.comment {
            output.push_str(&format!("/* {} */\n", comment));
        }

        output.push_str(&entry.key_value_line());
        output.push('\n');
        output.push_str(&entry.trailing_whitespace);
    }

    output.push_str(&document.tail);
    output
}

/// Canonical mode: one optional comment block and one key/value line per
/// entry, exactly one blank line between entries, no blank line before the
/// first or after the last entry, opaque content dropped.
fn render_stripped(document: &StringsDocument) -> String {
    document
        .entries
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
