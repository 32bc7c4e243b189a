//! ragelang -> host notifications.
//!
//! The host renders these: ghost comments after a line, an output pane for ASCII art, and
//! transient user messages.

use crate::host_events::command_ids;
use crate::lsp_transport::notification;
use ragelang_core::{DocumentId, GhostComment};
use serde_json::{Value, json};
use std::time::Duration;

/// LSP `MessageType` used by `window/showMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// An error message.
    Error,
    /// A warning message.
    Warning,
    /// An informational message.
    Info,
}

impl MessageType {
    fn as_u64(self) -> u64 {
        match self {
            MessageType::Error => 1,
            MessageType::Warning => 2,
            MessageType::Info => 3,
        }
    }
}

fn comment_params(document: &DocumentId, comment: &GhostComment) -> Value {
    json!({
        "uri": document.as_str(),
        "line": comment.anchor.line,
        "column": comment.anchor.column,
        "text": comment.text,
    })
}

/// `ragelang/ghostComment`: show `comment` for `duration`.
pub fn ghost_comment(document: &DocumentId, comment: &GhostComment, duration: Duration) -> Value {
    let mut params = comment_params(document, comment);
    params["durationMs"] = json!(duration.as_millis() as u64);
    notification("ragelang/ghostComment", params)
}

/// `ragelang/clearGhostComment`: remove the ghost comment matching anchor and text exactly.
pub fn clear_ghost_comment(document: &DocumentId, comment: &GhostComment) -> Value {
    notification("ragelang/clearGhostComment", comment_params(document, comment))
}

/// `ragelang/output`: replace the output pane content with `text` and reveal it.
pub fn output(text: &str) -> Value {
    notification("ragelang/output", json!({ "text": text }))
}

/// `window/showMessage`
pub fn show_message(typ: MessageType, message: &str) -> Value {
    notification(
        "window/showMessage",
        json!({ "type": typ.as_u64(), "message": message }),
    )
}

/// `initialize` result: full document sync and the `ragelang.*` commands.
pub fn server_capabilities() -> Value {
    json!({
        "capabilities": {
            "textDocumentSync": 1,
            "executeCommandProvider": {
                "commands": [
                    command_ids::TOGGLE,
                    command_ids::TRIGGER_ROAST,
                    command_ids::SET_API_KEY,
                    command_ids::SET_COOLDOWN,
                ]
            }
        },
        "serverInfo": { "name": "ragelang", "version": env!("CARGO_PKG_VERSION") }
    })
}
