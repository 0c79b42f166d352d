use std::fmt;

// @module: Entry model for .strings documents

// @struct: Single key/value entry with its surrounding formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringsEntry {
    // @field: Localization key, never empty for parsed entries
    pub key: String,

    // @field: Translated value, empty marks a missing translation
    pub value: String,

    // @field: Extracted comment text, lines joined with newlines
    pub comment: Option<String>,

    // @field: Verbatim comment lines as they appeared in the source
    pub raw_comment_block: Option<String>,

    // @field: Verbatim content preceding the entry (blank runs, opaque lines)
    pub leading_whitespace: String,

    // @field: Verbatim blank-line run following the entry
    pub trailing_whitespace: String,
}

impl StringsEntry {
    /// Create a bare entry with no comment and no surrounding whitespace
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        StringsEntry {
            key: key.into(),
            value: value.into(),
            comment: None,
            raw_comment_block: None,
            leading_whitespace: String::new(),
            trailing_whitespace: String::new(),
        }
    }

    /// Create an entry carrying a comment - used by tests and external consumers
    #[allow(dead_code)]
    pub fn with_comment(key: impl Into<String>, value: impl Into<String>, comment: impl Into<String>) -> Self {
        StringsEntry {
            comment: Some(comment.into()),
            ..Self::new(key, value)
        }
    }

    /// Whether this entry still waits for a translation
    pub fn has_empty_value(&self) -> bool {
        self.value.is_empty()
    }

    /// Canonical `"key" = "value";` line with escaping applied
    pub fn key_value_line(&self) -> String {
        format!("\"{}\" = \"{}\";", escape_text(&self.key), escape_text(&self.value))
    }
}

impl fmt::Display for StringsEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(comment) = &self.comment {
            writeln!(f, "/* {} */", comment)?;
        }
        writeln!(f, "{}", self.key_value_line())
    }
}

/// Decode the escape sequences of a quoted key or value.
///
/// `\"`, `\\`, `\n`, `\t` and `\r` are decoded to their characters; any
/// other backslash sequence (for example `\U0001F600`) is kept verbatim so
/// that re-encoding reproduces it unchanged.
pub fn unescape_text(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => {
                // Unknown sequence, pass through both characters
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Encode a key or value for embedding between double quotes.
///
/// Inverse of [`unescape_text`]: quotes, backslashes and control characters
/// are escaped, while a backslash opening an unknown sequence stays single so
/// that decoded passthrough sequences survive a rewrite byte-for-byte.
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\\' => {
                // A backslash starting a passthrough pair stays as-is; any
                // other backslash must be doubled to decode back to itself
                match chars.peek() {
                    Some(next) if !matches!(next, '"' | '\\' | 'n' | 't' | 'r' | '\n' | '\t' | '\r') => {
                        result.push('\\');
                        result.push(*next);
                        chars.next();
                    }
                    _ => result.push_str("\\\\"),
                }
            }
            other => result.push(other),
        }
    }

    result
}
