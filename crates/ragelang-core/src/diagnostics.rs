//! Line-keyed diagnostics data model.
//!
//! Hosts report diagnostics with full ranges; the trigger pipeline only cares about the line a
//! diagnostic starts on, so this model keeps just that (plus the text needed to build a roast).

use serde::{Deserialize, Serialize};

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Error diagnostics. The only severity that arms a roast.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Information,
    /// Hint diagnostics.
    Hint,
}

/// A single diagnostic item for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Zero-based line the diagnostic starts on.
    pub line: usize,
    /// Diagnostic message.
    pub message: String,
    /// Diagnostic severity.
    pub severity: DiagnosticSeverity,
    /// Optional diagnostic source (e.g. `"rust-analyzer"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Optional diagnostic code (stringified).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic without source/code metadata.
    pub fn new(line: usize, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            severity,
            source: None,
            code: None,
        }
    }

    /// Shorthand for an error-severity diagnostic.
    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, DiagnosticSeverity::Error, message)
    }

    /// Attach a diagnostic source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach a diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns `true` for error-severity diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

/// Iterate over the error-severity diagnostics in `diagnostics`.
pub fn errors_only(diagnostics: &[Diagnostic]) -> impl Iterator<Item = &Diagnostic> {
    diagnostics.iter().filter(|d| d.is_error())
}
