//! One-shot roast of a file line.

use super::load_effective;
use crate::sinks::ConsoleSink;
use anyhow::{Context, Result, bail};
use ragelang_core::Diagnostic;
use ragelang_runtime::RoastSession;
use std::path::Path;
use std::sync::Arc;

/// Editor language id for a file extension; `plaintext` when unknown.
pub fn language_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "rs" => "rust",
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "go" => "go",
        "c" | "h" => "c",
        "cc" | "cpp" | "hpp" => "cpp",
        "java" => "java",
        "rb" => "ruby",
        "sh" | "bash" => "shellscript",
        "lua" => "lua",
        "html" | "htm" => "html",
        "xml" => "xml",
        "css" => "css",
        "scss" => "scss",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "md" => "markdown",
        "sql" => "sql",
        "hs" => "haskell",
        "tex" => "latex",
        "erl" => "erlang",
        _ => "plaintext",
    }
}

pub fn execute(
    config_path: &Path,
    file: &Path,
    line: usize,
    language: Option<&str>,
    errors: Vec<String>,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let line_count = text.lines().count().max(1);
    if line >= line_count {
        bail!("{} has {line_count} lines, line {line} is out of range", file.display());
    }

    let mut config = load_effective(config_path)?;
    // Errors given on the command line must be indexed even if automatic roasts are off.
    config.enabled = true;
    let language = language.unwrap_or_else(|| language_for_path(file));
    let uri = format!("file://{}", file.display());
    let diagnostics: Vec<Diagnostic> = errors
        .into_iter()
        .map(|message| Diagnostic::error(line, message))
        .collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let sink = Arc::new(ConsoleSink);
        let mut session = RoastSession::new(config, sink.clone(), sink);
        session.did_open(&uri, language, &text);
        session.publish_diagnostics(&uri, diagnostics);
        session.trigger_roast(Some(&uri), Some(line));
        session.settle().await;
        session.shutdown().await;
    });
    Ok(())
}
