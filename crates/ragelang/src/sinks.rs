//! Rendering sinks for the CLI.
//!
//! [`LspSink`] turns rendering calls into `ragelang/*` notifications for the editor host;
//! [`ConsoleSink`] prints them for one-shot use in a terminal.

use ragelang_core::{DocumentId, GhostComment};
use ragelang_lsp::{MessageType, client_messages, write_lsp_message};
use ragelang_runtime::{DecorationSink, NoticeLevel, OutputSink};
use serde_json::Value;
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::warn;

/// Writes host notifications as LSP frames.
pub struct LspSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> LspSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Write one frame. A closed host pipe is logged, not fatal.
    pub fn send(&self, message: &Value) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = write_lsp_message(&mut *writer, message) {
            warn!(error = %err, "failed to write to host");
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> DecorationSink for LspSink<W> {
    fn show(&self, document: &DocumentId, comment: &GhostComment, duration: Duration) {
        self.send(&client_messages::ghost_comment(document, comment, duration));
    }

    fn clear(&self, document: &DocumentId, comment: &GhostComment) {
        self.send(&client_messages::clear_ghost_comment(document, comment));
    }
}

impl<W: Write + Send> OutputSink for LspSink<W> {
    fn show_output(&self, text: &str) {
        self.send(&client_messages::output(text));
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        let typ = match level {
            NoticeLevel::Info => MessageType::Info,
            NoticeLevel::Warning => MessageType::Warning,
            NoticeLevel::Error => MessageType::Error,
        };
        self.send(&client_messages::show_message(typ, message));
    }
}

/// Prints roasts to the terminal. Ghost comments are shown once and never cleared.
pub struct ConsoleSink;

impl DecorationSink for ConsoleSink {
    fn show(&self, _document: &DocumentId, comment: &GhostComment, _duration: Duration) {
        println!("{:>4} | {}", comment.anchor.line + 1, comment.text);
    }

    fn clear(&self, _document: &DocumentId, _comment: &GhostComment) {}
}

impl OutputSink for ConsoleSink {
    fn show_output(&self, text: &str) {
        println!("{}", text.trim_end());
        println!();
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => eprintln!("{message}"),
            NoticeLevel::Warning | NoticeLevel::Error => eprintln!("{level:?}: {message}"),
        }
    }
}
