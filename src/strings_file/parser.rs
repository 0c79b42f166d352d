use once_cell::sync::Lazy;
use regex::Regex;

use super::document::StringsDocument;
use super::model::{StringsEntry, unescape_text};

// @module: Total parser for .strings document text

// @const: Key/value line with optional trailing comment
static KEY_VALUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*"((?:[^"\\]|\\.)+)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;\s*(?://\s*(.*?)\s*|/\*\s*(.*?)\s*\*/\s*)?$"#).unwrap()
});

/// Parse document text into an ordered entry sequence.
///
/// This function is total: it never fails on malformed input. Lines that are
/// not a key/value pair, a comment or a blank line are kept verbatim and
/// reattached ahead of the next entry (or in the document tail when no entry
/// follows), so unstripped rendering reproduces them byte for byte.
pub fn parse(text: &str) -> StringsDocument {
    let mut entries: Vec<StringsEntry> = Vec::new();

    // Opaque content (junk lines, detached comments, blank runs) waiting to
    // become the next entry's leading whitespace
    let mut pending = String::new();

    // Comment run directly above the current position, still eligible to
    // attach to a key/value line
    let mut comment_raw = String::new();
    let mut comment_texts: Vec<String> = Vec::new();

    // Inner text of a multi-line /* */ block being collected
    let mut block_parts: Vec<String> = Vec::new();
    let mut in_block = false;

    // Blank lines still belong to the previously parsed entry
    let mut absorbing = false;

    for raw_line in text.split_inclusive('\n') {
        let content = strip_line_terminator(raw_line);

        if in_block {
            comment_raw.push_str(raw_line);
            match content.find("*/") {
                Some(close) => {
                    in_block = false;
                    if content[close + 2..].trim().is_empty() {
                        block_parts.push(content[..close].to_string());
                        comment_texts.push(block_parts.join("\n").trim().to_string());
                    } else {
                        // The block closes mid-line with more content after
                        // it; the whole run degrades to opaque content
                        flush_comment_run(&mut pending, &mut comment_raw, &mut comment_texts);
                    }
                    block_parts.clear();
                }
                None => block_parts.push(content.to_string()),
            }
            continue;
        }

        let trimmed = content.trim();

        if trimmed.is_empty() {
            match entries.last_mut() {
                Some(last) if absorbing => last.trailing_whitespace.push_str(raw_line),
                _ => {
                    // A blank line detaches any comment run from the entry below
                    flush_comment_run(&mut pending, &mut comment_raw, &mut comment_texts);
                    pending.push_str(raw_line);
                }
            }
            continue;
        }

        absorbing = false;

        if let Some(rest) = trimmed.strip_prefix("//") {
            comment_raw.push_str(raw_line);
            comment_texts.push(rest.trim().to_string());
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("/*") {
            match rest.find("*/") {
                Some(close) if rest[close + 2..].trim().is_empty() => {
                    comment_raw.push_str(raw_line);
                    comment_texts.push(rest[..close].trim().to_string());
                }
                Some(_) => {
                    // Content after the closing delimiter, not a clean comment line
                    flush_comment_run(&mut pending, &mut comment_raw, &mut comment_texts);
                    pending.push_str(raw_line);
                }
                None => {
                    comment_raw.push_str(raw_line);
                    block_parts.push(rest.to_string());
                    in_block = true;
                }
            }
            continue;
        }

        if let Some(caps) = KEY_VALUE_REGEX.captures(content) {
            let key = unescape_text(caps.get(1).map_or("", |m| m.as_str()));
            let value = unescape_text(caps.get(2).map_or("", |m| m.as_str()));
            let inline_comment = caps
                .get(3)
                .or(caps.get(4))
                .map(|m| m.as_str().to_string())
                .filter(|text| !text.is_empty());

            let run_text = if comment_texts.is_empty() {
                None
            } else {
                Some(comment_texts.join("\n"))
            };
            let run_raw = std::mem::take(&mut comment_raw);
            comment_texts.clear();

            // A raw block is only kept when it covers the full comment; once
            // an inline note joins the text, the writer synthesizes a block
            let (comment, raw_comment_block) = match (run_text, inline_comment) {
                (Some(run), Some(inline)) => (Some(format!("{}\n{}", run, inline)), None),
                (Some(run), None) => (Some(run), Some(run_raw)),
                (None, Some(inline)) => (Some(inline), None),
                (None, None) => (None, None),
            };

            entries.push(StringsEntry {
                key,
                value,
                comment,
                raw_comment_block,
                leading_whitespace: std::mem::take(&mut pending),
                trailing_whitespace: String::new(),
            });
            absorbing = true;
            continue;
        }

        // Unrecognized line, preserved verbatim ahead of the next entry
        flush_comment_run(&mut pending, &mut comment_raw, &mut comment_texts);
        pending.push_str(raw_line);
    }

    // Whatever is still open never found its entry and lands in the tail
    flush_comment_run(&mut pending, &mut comment_raw, &mut comment_texts);

    StringsDocument { entries, tail: pending }
}

fn flush_comment_run(pending: &mut String, comment_raw: &mut String, comment_texts: &mut Vec<String>) {
    pending.push_str(comment_raw);
    comment_raw.clear();
    comment_texts.clear();
}

fn strip_line_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |rest| rest.strip_suffix('\r').unwrap_or(rest))
}
