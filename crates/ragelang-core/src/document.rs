//! Open documents: URI, language id and a rope-backed text buffer.
//!
//! The trigger engine itself only needs line numbers. The text is kept so a roast request can
//! carry the errored line, and so ghost comments can be anchored at the end of that line.

use ropey::Rope;
use std::fmt;

/// Identifies a document by its host URI (e.g. `file:///src/main.rs`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap a URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for DocumentId {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

/// An open document.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    language_id: String,
    text: Rope,
}

impl Document {
    /// Create a document from its full text.
    pub fn new(id: impl Into<DocumentId>, language_id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            language_id: language_id.into(),
            text: Rope::from_str(text),
        }
    }

    /// Document URI.
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Editor language id (e.g. `"rust"`, `"python"`).
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// Replace the full text (full-document sync).
    pub fn set_text(&mut self, text: &str) {
        self.text = Rope::from_str(text);
    }

    /// Full text.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Number of lines (a trailing newline starts an empty last line, like most editors).
    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Text of `line` without its line terminator, or `None` if out of range.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.text.len_lines() {
            return None;
        }
        let mut text = self.text.line(line).to_string();
        while text.ends_with(['\n', '\r']) {
            text.pop();
        }
        Some(text)
    }

    /// Column (in chars) just past the last character of `line`.
    pub fn line_end_column(&self, line: usize) -> Option<usize> {
        self.line_text(line).map(|text| text.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_strips_terminators() {
        let doc = Document::new("file:///a.rs", "rust", "fn main() {\r\n  let x = ;\n}\n");
        assert_eq!(doc.line_text(0).as_deref(), Some("fn main() {"));
        assert_eq!(doc.line_text(1).as_deref(), Some("  let x = ;"));
        assert_eq!(doc.line_text(3).as_deref(), Some(""));
        assert_eq!(doc.line_text(4), None);
        assert_eq!(doc.line_end_column(1), Some(11));
    }

    #[test]
    fn test_set_text_replaces_content() {
        let mut doc = Document::new("file:///a.py", "python", "a\nb\n");
        doc.set_text("only");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.text(), "only");
    }
}
