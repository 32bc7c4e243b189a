//! Pending error index: line -> error diagnostics not yet consumed by a roast.

use crate::diagnostics::{Diagnostic, errors_only};
use std::collections::BTreeMap;

/// Mapping from zero-based line number to the error diagnostics believed active on that line.
///
/// Invariant: every key maps to a non-empty list. Per-line order is append order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingErrorIndex {
    lines: BTreeMap<usize, Vec<Diagnostic>>,
}

impl PendingErrorIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a full diagnostics snapshot (non-errors are ignored).
    pub fn from_snapshot(diagnostics: &[Diagnostic]) -> Self {
        let mut index = Self::new();
        index.merge(diagnostics);
        index
    }

    /// Append every error-severity diagnostic in `diagnostics` to its line entry.
    ///
    /// Returns the number of diagnostics appended.
    pub fn merge(&mut self, diagnostics: &[Diagnostic]) -> usize {
        let mut appended = 0;
        for diagnostic in errors_only(diagnostics) {
            self.lines
                .entry(diagnostic.line)
                .or_default()
                .push(diagnostic.clone());
            appended += 1;
        }
        appended
    }

    /// Replace the whole index with the errors found in `diagnostics`.
    pub fn replace(&mut self, diagnostics: &[Diagnostic]) {
        self.lines.clear();
        self.merge(diagnostics);
    }

    /// Returns `true` if `line` has pending errors.
    pub fn contains(&self, line: usize) -> bool {
        self.lines.contains_key(&line)
    }

    /// Pending errors on `line` (empty slice if none).
    pub fn errors_at(&self, line: usize) -> &[Diagnostic] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or_default()
    }

    /// Remove and return the entry for `line`.
    pub fn take(&mut self, line: usize) -> Option<Vec<Diagnostic>> {
        self.lines.remove(&line)
    }

    /// Lines with pending errors, ascending.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.keys().copied()
    }

    /// Number of lines with pending errors.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no line has pending errors.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticSeverity;

    #[test]
    fn test_merge_ignores_non_errors_and_appends() {
        let mut index = PendingErrorIndex::new();
        let appended = index.merge(&[
            Diagnostic::error(1, "a"),
            Diagnostic::new(1, DiagnosticSeverity::Warning, "w"),
            Diagnostic::error(1, "b"),
        ]);
        assert_eq!(appended, 2);
        let messages: Vec<_> = index.errors_at(1).iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn test_no_empty_entries_for_warning_only_lines() {
        let index =
            PendingErrorIndex::from_snapshot(&[Diagnostic::new(4, DiagnosticSeverity::Hint, "h")]);
        assert!(index.is_empty());
        assert!(!index.contains(4));
        assert!(index.errors_at(4).is_empty());
    }

    #[test]
    fn test_replace_drops_stale_lines() {
        let mut index = PendingErrorIndex::from_snapshot(&[Diagnostic::error(3, "x")]);
        index.replace(&[Diagnostic::error(8, "y")]);
        assert_eq!(index.lines().collect::<Vec<_>>(), vec![8]);
    }
}
