#![warn(missing_docs)]
//! `ragelang-lang` - data-driven language configuration helpers for `ragelang`.
//!
//! This crate intentionally stays lightweight and has no dependencies. It maps editor language
//! ids (as reported by the host, e.g. `"python"` or `"rust"`) to comment syntax, so roasts can be
//! rendered as something that looks like a comment on the errored line.

/// Comment tokens/config for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports only block comments.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            line: None,
            block_start: Some(start.into()),
            block_end: Some(end.into()),
        }
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Wrap `text` so it reads as a single comment.
    ///
    /// Line comments win over block comments when both are configured. A config with neither
    /// falls back to `//`.
    pub fn wrap(&self, text: &str) -> String {
        if let Some(token) = self.line.as_deref().filter(|s| !s.is_empty()) {
            return format!("{token} {text}");
        }
        if self.has_block() {
            let start = self.block_start.as_deref().unwrap_or_default();
            let end = self.block_end.as_deref().unwrap_or_default();
            return format!("{start} {text} {end}");
        }
        format!("{DEFAULT_LINE_COMMENT} {text}")
    }
}

/// Line comment token used for languages not present in the table.
pub const DEFAULT_LINE_COMMENT: &str = "//";

const HASH_LANGUAGES: &[&str] = &[
    "python",
    "shellscript",
    "yaml",
    "makefile",
    "ruby",
    "perl",
    "r",
    "toml",
    "dockerfile",
    "powershell",
    "elixir",
    "julia",
    "nim",
];

const MARKUP_LANGUAGES: &[&str] = &["html", "xml", "svg", "markdown", "vue-html"];

const CSS_LANGUAGES: &[&str] = &["css", "less", "scss"];

const DASH_LANGUAGES: &[&str] = &["lua", "sql", "haskell", "elm", "ada"];

const SEMICOLON_LANGUAGES: &[&str] = &["clojure", "lisp", "scheme", "racket", "ini"];

const PERCENT_LANGUAGES: &[&str] = &["latex", "tex", "erlang", "matlab", "prolog"];

/// Look up the comment syntax for an editor language id.
///
/// Ids are matched case-insensitively. Unknown ids get C-style `//` line comments.
pub fn comment_config_for_language(language_id: &str) -> CommentConfig {
    let id = language_id.trim().to_ascii_lowercase();
    let id = id.as_str();

    if HASH_LANGUAGES.contains(&id) {
        CommentConfig::line("#")
    } else if MARKUP_LANGUAGES.contains(&id) {
        CommentConfig::block("<!--", "-->")
    } else if CSS_LANGUAGES.contains(&id) {
        CommentConfig::block("/*", "*/")
    } else if DASH_LANGUAGES.contains(&id) {
        CommentConfig::line("--")
    } else if SEMICOLON_LANGUAGES.contains(&id) {
        CommentConfig::line(";")
    } else if PERCENT_LANGUAGES.contains(&id) {
        CommentConfig::line("%")
    } else {
        CommentConfig::line(DEFAULT_LINE_COMMENT)
    }
}

/// Render `roast` as a ghost comment for the given language.
pub fn ghost_comment_text(language_id: &str, roast: &str) -> String {
    comment_config_for_language(language_id).wrap(roast.trim())
}
