use pretty_assertions::assert_eq;
use ragelang_core::{Diagnostic, DiagnosticSeverity, DocumentId, GhostComment, DecorationAnchor};
use ragelang_lsp::{
    HostCommand, HostEvent, MessageType, clear_ghost_comment, ghost_comment, output,
    read_lsp_message, show_message, write_lsp_message,
};
use serde_json::json;
use std::io::Cursor;
use std::time::Duration;

#[test]
fn test_publish_diagnostics_keeps_start_line_and_severity() {
    let msg = json!({
        "jsonrpc": "2.0",
        "method": "textDocument/publishDiagnostics",
        "params": {
            "uri": "file:///main.rs",
            "diagnostics": [
                {
                    "range": { "start": { "line": 4, "character": 2 }, "end": { "line": 6, "character": 0 } },
                    "severity": 1,
                    "message": "cannot find value `x`",
                    "source": "rustc",
                    "code": "E0425"
                },
                {
                    "range": { "start": { "line": 7, "character": 0 }, "end": { "line": 7, "character": 3 } },
                    "severity": 2,
                    "message": "unused variable",
                    "code": 42
                },
                {
                    "range": { "start": { "line": 9, "character": 0 }, "end": { "line": 9, "character": 1 } },
                    "message": "no severity"
                },
                { "message": "no range, dropped" }
            ]
        }
    });

    let event = HostEvent::from_json(&msg).unwrap();
    assert_eq!(
        event,
        HostEvent::DiagnosticsPublished {
            uri: "file:///main.rs".to_string(),
            diagnostics: vec![
                Diagnostic::error(4, "cannot find value `x`")
                    .with_source("rustc")
                    .with_code("E0425"),
                Diagnostic::new(7, DiagnosticSeverity::Warning, "unused variable").with_code("42"),
                Diagnostic::error(9, "no severity"),
            ],
        }
    );
}

#[test]
fn test_document_sync_events() {
    let open = json!({
        "method": "textDocument/didOpen",
        "params": { "textDocument": { "uri": "file:///a.py", "languageId": "python", "version": 1, "text": "x = (\n" } }
    });
    assert_eq!(
        HostEvent::from_json(&open),
        Some(HostEvent::DocumentOpened {
            uri: "file:///a.py".to_string(),
            language_id: "python".to_string(),
            text: "x = (\n".to_string(),
        })
    );

    let change = json!({
        "method": "textDocument/didChange",
        "params": {
            "textDocument": { "uri": "file:///a.py", "version": 2 },
            "contentChanges": [ { "text": "old" }, { "text": "x = ()\n" } ]
        }
    });
    assert_eq!(
        HostEvent::from_json(&change),
        Some(HostEvent::DocumentChanged {
            uri: "file:///a.py".to_string(),
            text: Some("x = ()\n".to_string()),
        })
    );

    let close = json!({
        "method": "textDocument/didClose",
        "params": { "textDocument": { "uri": "file:///a.py" } }
    });
    assert_eq!(
        HostEvent::from_json(&close),
        Some(HostEvent::DocumentClosed {
            uri: "file:///a.py".to_string()
        })
    );
}

#[test]
fn test_incremental_change_carries_no_text() {
    let change = json!({
        "method": "textDocument/didChange",
        "params": {
            "textDocument": { "uri": "file:///a.py" },
            "contentChanges": [ { "range": {}, "text": "y" } ]
        }
    });
    assert_eq!(
        HostEvent::from_json(&change),
        Some(HostEvent::DocumentChanged {
            uri: "file:///a.py".to_string(),
            text: None,
        })
    );
}

#[test]
fn test_cursor_moved_and_exit() {
    let moved = json!({ "method": "ragelang/cursorMoved", "params": { "uri": "file:///a.rs", "line": 12 } });
    assert_eq!(
        HostEvent::from_json(&moved),
        Some(HostEvent::CursorMoved {
            uri: "file:///a.rs".to_string(),
            line: 12
        })
    );
    assert_eq!(HostEvent::from_json(&json!({ "method": "exit" })), Some(HostEvent::Exit));
}

#[test]
fn test_execute_command_variants() {
    let parse = |command: &str, arguments: serde_json::Value| {
        HostEvent::from_json(&json!({
            "method": "workspace/executeCommand",
            "params": { "command": command, "arguments": arguments }
        }))
    };

    assert_eq!(
        parse("ragelang.toggle", json!([])),
        Some(HostEvent::Command(HostCommand::Toggle))
    );
    assert_eq!(
        parse("ragelang.triggerRoast", json!([{ "uri": "file:///a.rs", "line": 3 }])),
        Some(HostEvent::Command(HostCommand::TriggerRoast {
            uri: Some("file:///a.rs".to_string()),
            line: Some(3),
        }))
    );
    assert_eq!(
        parse("ragelang.triggerRoast", json!([])),
        Some(HostEvent::Command(HostCommand::TriggerRoast { uri: None, line: None }))
    );
    assert_eq!(
        parse("ragelang.setApiKey", json!(["sk-123"])),
        Some(HostEvent::Command(HostCommand::SetApiKey("sk-123".to_string())))
    );
    assert_eq!(
        parse("ragelang.setCooldown", json!([7])),
        Some(HostEvent::Command(HostCommand::SetCooldown("7".to_string())))
    );
    assert_eq!(
        parse("ragelang.setCooldown", json!([{ "bad": true }])),
        Some(HostEvent::Command(HostCommand::SetCooldown(String::new())))
    );
    assert_eq!(parse("other.command", json!([])), None);
}

#[test]
fn test_unknown_and_malformed_messages_are_ignored() {
    assert_eq!(HostEvent::from_json(&json!({ "method": "initialized", "params": {} })), None);
    assert_eq!(HostEvent::from_json(&json!({ "id": 1, "result": null })), None);
    assert_eq!(
        HostEvent::from_json(&json!({ "method": "ragelang/cursorMoved", "params": { "uri": "x" } })),
        None
    );
}

#[test]
fn test_outbound_notifications_frame_and_parse() {
    let doc = DocumentId::new("file:///a.rs");
    let comment = GhostComment::new(DecorationAnchor::new(3, 14), "// 🔥 nice one");

    let mut buf = Vec::new();
    write_lsp_message(&mut buf, &ghost_comment(&doc, &comment, Duration::from_secs(5))).unwrap();
    write_lsp_message(&mut buf, &clear_ghost_comment(&doc, &comment)).unwrap();
    write_lsp_message(&mut buf, &output("art")).unwrap();
    write_lsp_message(&mut buf, &show_message(MessageType::Error, "bad")).unwrap();

    let mut reader = Cursor::new(buf);
    let shown = read_lsp_message(&mut reader).unwrap().unwrap();
    assert_eq!(
        shown,
        json!({
            "jsonrpc": "2.0",
            "method": "ragelang/ghostComment",
            "params": { "uri": "file:///a.rs", "line": 3, "column": 14, "text": "// 🔥 nice one", "durationMs": 5000 }
        })
    );

    let cleared = read_lsp_message(&mut reader).unwrap().unwrap();
    assert_eq!(cleared["method"], "ragelang/clearGhostComment");
    assert_eq!(cleared["params"]["line"], 3);
    assert!(cleared["params"].get("durationMs").is_none());

    let out = read_lsp_message(&mut reader).unwrap().unwrap();
    assert_eq!(out["params"]["text"], "art");

    let msg = read_lsp_message(&mut reader).unwrap().unwrap();
    assert_eq!(msg["params"], json!({ "type": 1, "message": "bad" }));

    assert!(read_lsp_message(&mut reader).unwrap().is_none());
}
