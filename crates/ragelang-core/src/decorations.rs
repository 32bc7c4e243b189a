//! Ghost-comment decorations (virtual text) data model.
//!
//! A ghost comment is a piece of virtual text rendered after the end of an errored line, without
//! modifying the document text. Decorations are kept per document and removed by exact match of
//! anchor + text, so two identical roasts on the same line are tracked as two entries and each
//! expiry removes exactly one of them.

use crate::document::DocumentId;
use std::collections::HashMap;
use std::time::Duration;

/// Default time a ghost comment stays visible.
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Where a ghost comment is anchored: a point on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationAnchor {
    /// Zero-based line.
    pub line: usize,
    /// Column in chars; ghost comments anchor at the end of the line.
    pub column: usize,
}

impl DecorationAnchor {
    /// Create an anchor.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A single ghost comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GhostComment {
    /// Anchor point.
    pub anchor: DecorationAnchor,
    /// Rendered text, already wrapped in the language's comment syntax.
    pub text: String,
}

impl GhostComment {
    /// Create a ghost comment.
    pub fn new(anchor: DecorationAnchor, text: impl Into<String>) -> Self {
        Self {
            anchor,
            text: text.into(),
        }
    }
}

/// Ghost comments currently shown, keyed per document.
#[derive(Debug, Clone, Default)]
pub struct DecorationStore {
    by_document: HashMap<DocumentId, Vec<GhostComment>>,
}

impl DecorationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ghost comment to `document`.
    pub fn add(&mut self, document: &DocumentId, comment: GhostComment) {
        self.by_document
            .entry(document.clone())
            .or_default()
            .push(comment);
    }

    /// Remove one ghost comment matching `comment` exactly (anchor and text).
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_exact(&mut self, document: &DocumentId, comment: &GhostComment) -> bool {
        let Some(comments) = self.by_document.get_mut(document) else {
            return false;
        };
        let Some(index) = comments.iter().position(|c| c == comment) else {
            return false;
        };
        comments.remove(index);
        if comments.is_empty() {
            self.by_document.remove(document);
        }
        true
    }

    /// Drop every ghost comment of `document`, returning what was removed.
    pub fn clear_document(&mut self, document: &DocumentId) -> Vec<GhostComment> {
        self.by_document.remove(document).unwrap_or_default()
    }

    /// Ghost comments currently shown for `document`.
    pub fn for_document(&self, document: &DocumentId) -> &[GhostComment] {
        self.by_document
            .get(document)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Documents that currently have ghost comments.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentId> {
        self.by_document.keys()
    }

    /// Total number of ghost comments across documents.
    pub fn len(&self) -> usize {
        self.by_document.values().map(Vec::len).sum()
    }

    /// Returns `true` if no ghost comment is shown.
    pub fn is_empty(&self) -> bool {
        self.by_document.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.by_document.clear();
    }
}
