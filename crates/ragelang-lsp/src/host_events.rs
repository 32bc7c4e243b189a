//! Typed host -> ragelang events.
//!
//! The host editor talks to the bridge with JSON-RPC notifications. Most are standard LSP
//! (`textDocument/publishDiagnostics`, `didOpen`, `didChange`, `didClose`,
//! `workspace/executeCommand`); cursor moves use the `ragelang/cursorMoved` extension, since LSP
//! has no client->server selection notification.

use ragelang_core::{Diagnostic, DiagnosticSeverity};
use serde_json::Value;

/// Command ids accepted through `workspace/executeCommand`.
pub mod command_ids {
    /// Flip the enabled flag.
    pub const TOGGLE: &str = "ragelang.toggle";
    /// Roast a line now.
    pub const TRIGGER_ROAST: &str = "ragelang.triggerRoast";
    /// Store an API key.
    pub const SET_API_KEY: &str = "ragelang.setApiKey";
    /// Set the cooldown in seconds.
    pub const SET_COOLDOWN: &str = "ragelang.setCooldown";
}

/// Convert the numeric LSP `DiagnosticSeverity` into the core enum.
pub fn severity_from_u64(value: u64) -> Option<DiagnosticSeverity> {
    match value {
        1 => Some(DiagnosticSeverity::Error),
        2 => Some(DiagnosticSeverity::Warning),
        3 => Some(DiagnosticSeverity::Information),
        4 => Some(DiagnosticSeverity::Hint),
        _ => None,
    }
}

/// Parse one LSP diagnostic object.
///
/// Only the start line of the range is kept. LSP makes `severity` optional and leaves its meaning
/// to the client when absent; such diagnostics are treated as errors, matching what editors show.
pub fn diagnostic_from_value(value: &Value) -> Option<Diagnostic> {
    let line = value.get("range")?.get("start")?.get("line")?.as_u64()? as usize;
    let severity = match value.get("severity").and_then(Value::as_u64) {
        Some(raw) => severity_from_u64(raw)?,
        None => DiagnosticSeverity::Error,
    };
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let mut diagnostic = Diagnostic::new(line, severity, message);
    diagnostic.source = value
        .get("source")
        .and_then(Value::as_str)
        .map(|s| s.to_string());
    diagnostic.code = value.get("code").and_then(|code| match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    Some(diagnostic)
}

/// A command invoked by the user through the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// `ragelang.toggle`
    Toggle,
    /// `ragelang.triggerRoast [{ uri?, line? }]`; missing fields mean "active document / cursor".
    TriggerRoast {
        /// Document to roast.
        uri: Option<String>,
        /// Line to roast.
        line: Option<usize>,
    },
    /// `ragelang.setApiKey ["key"]`
    SetApiKey(String),
    /// `ragelang.setCooldown ["seconds"]` (raw user input; validated later)
    SetCooldown(String),
}

impl HostCommand {
    /// Parse `workspace/executeCommand` params.
    pub fn from_params(params: &Value) -> Option<Self> {
        let command = params.get("command")?.as_str()?;
        let first = params
            .get("arguments")
            .and_then(Value::as_array)
            .and_then(|args| args.first());

        match command {
            command_ids::TOGGLE => Some(Self::Toggle),
            command_ids::TRIGGER_ROAST => {
                let uri = first
                    .and_then(|a| a.get("uri"))
                    .and_then(Value::as_str)
                    .map(|s| s.to_string());
                let line = first
                    .and_then(|a| a.get("line"))
                    .and_then(Value::as_u64)
                    .map(|l| l as usize);
                Some(Self::TriggerRoast { uri, line })
            }
            command_ids::SET_API_KEY => Some(Self::SetApiKey(argument_text(first))),
            command_ids::SET_COOLDOWN => Some(Self::SetCooldown(argument_text(first))),
            _ => None,
        }
    }
}

// Settings commands accept a bare string or number; anything else becomes "" and fails validation.
fn argument_text(arg: Option<&Value>) -> String {
    match arg {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// A parsed host notification.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// `textDocument/publishDiagnostics`: the full diagnostic set for `uri`.
    DiagnosticsPublished {
        /// Document URI.
        uri: String,
        /// Every diagnostic currently known for the document.
        diagnostics: Vec<Diagnostic>,
    },
    /// `textDocument/didOpen`
    DocumentOpened {
        /// Document URI.
        uri: String,
        /// Editor language id.
        language_id: String,
        /// Full text.
        text: String,
    },
    /// `textDocument/didChange` (full sync; the last content change wins).
    DocumentChanged {
        /// Document URI.
        uri: String,
        /// New full text, if the host sent one.
        text: Option<String>,
    },
    /// `textDocument/didClose`
    DocumentClosed {
        /// Document URI.
        uri: String,
    },
    /// `ragelang/cursorMoved`
    CursorMoved {
        /// Document URI the cursor is in (becomes the active document).
        uri: String,
        /// Zero-based line of the primary cursor.
        line: usize,
    },
    /// `workspace/executeCommand`
    Command(HostCommand),
    /// `exit`
    Exit,
}

fn text_document_uri(params: &Value) -> Option<String> {
    params
        .get("textDocument")?
        .get("uri")?
        .as_str()
        .map(|s| s.to_string())
}

impl HostEvent {
    /// Parse a notification by method name and `params` payload.
    ///
    /// Returns `None` for unknown methods or payloads missing required fields.
    pub fn from_method_and_params(method: &str, params: &Value) -> Option<Self> {
        match method {
            "textDocument/publishDiagnostics" => {
                let uri = params.get("uri")?.as_str()?.to_string();
                let diagnostics = params
                    .get("diagnostics")
                    .and_then(Value::as_array)
                    .map(|arr| arr.iter().filter_map(diagnostic_from_value).collect())
                    .unwrap_or_default();
                Some(Self::DiagnosticsPublished { uri, diagnostics })
            }
            "textDocument/didOpen" => {
                let doc = params.get("textDocument")?;
                Some(Self::DocumentOpened {
                    uri: doc.get("uri")?.as_str()?.to_string(),
                    language_id: doc
                        .get("languageId")
                        .and_then(Value::as_str)
                        .unwrap_or("plaintext")
                        .to_string(),
                    text: doc
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                        .to_string(),
                })
            }
            "textDocument/didChange" => {
                let uri = text_document_uri(params)?;
                let text = params
                    .get("contentChanges")
                    .and_then(Value::as_array)
                    .and_then(|changes| {
                        changes
                            .iter()
                            .rev()
                            .filter(|c| c.get("range").is_none())
                            .find_map(|c| c.get("text").and_then(Value::as_str))
                    })
                    .map(|s| s.to_string());
                Some(Self::DocumentChanged { uri, text })
            }
            "textDocument/didClose" => Some(Self::DocumentClosed {
                uri: text_document_uri(params)?,
            }),
            "ragelang/cursorMoved" => Some(Self::CursorMoved {
                uri: params.get("uri")?.as_str()?.to_string(),
                line: params.get("line")?.as_u64()? as usize,
            }),
            "workspace/executeCommand" => HostCommand::from_params(params).map(Self::Command),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Parse a raw JSON-RPC message (`{ method, params }`).
    pub fn from_json(msg: &Value) -> Option<Self> {
        let method = msg.get("method")?.as_str()?;
        static NULL: Value = Value::Null;
        let params = msg.get("params").unwrap_or(&NULL);
        let event = Self::from_method_and_params(method, params);
        if event.is_none() {
            tracing::trace!(method, "ignoring host message");
        }
        event
    }
}
