//! Editor host bridge on stdio.
//!
//! A reader thread parses LSP frames from stdin and forwards them over a channel; the session
//! handles them one at a time on a single-threaded tokio runtime, so roast acquisition and
//! decoration expiry run in between host events.

use super::{load_effective, persist};
use crate::sinks::LspSink;
use anyhow::Result;
use ragelang_core::{RoastCommand, RoastConfig};
use ragelang_lsp::{
    HostCommand, HostEvent, METHOD_NOT_FOUND, error_response, read_lsp_message, response,
    server_capabilities,
};
use ragelang_runtime::{NoticeLevel, OutputSink, RoastSession};
use serde_json::Value;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Run the bridge until `exit` or end of input.
pub fn execute(config_path: &Path) -> Result<()> {
    let config = load_effective(config_path)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config, config_path));
    Ok(())
}

fn read_loop<R: BufRead>(mut reader: R, tx: mpsc::UnboundedSender<Value>) {
    loop {
        match read_lsp_message(&mut reader) {
            Ok(Some(message)) => {
                if tx.send(message).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                warn!(error = %err, "skipping malformed host message");
            }
            Err(err) if err.kind() == io::ErrorKind::InvalidInput => {
                warn!(error = %err, "lost message framing, closing host input");
                break;
            }
            Err(err) => {
                warn!(error = %err, "host input closed");
                break;
            }
        }
    }
}

async fn run(config: RoastConfig, config_path: &Path) {
    let sink = Arc::new(LspSink::new(io::stdout()));
    let mut session = RoastSession::new(config, sink.clone(), sink.clone());
    if !session.has_remote_provider() {
        sink.notify(
            NoticeLevel::Warning,
            "RageLang: No Gemini API key provided. Using default roasts instead.",
        );
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_loop(io::stdin().lock(), tx));
    info!("bridge ready");

    while let Some(message) = rx.recv().await {
        let id = message.get("id").cloned();
        let method = message
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match (id, method.as_str()) {
            (Some(id), "initialize") => sink.send(&response(id, server_capabilities())),
            (Some(id), "shutdown") => sink.send(&response(id, Value::Null)),
            (id, _) => match HostEvent::from_json(&message) {
                Some(HostEvent::Exit) => break,
                Some(event) => {
                    handle(&mut session, event, config_path, &*sink);
                    if let Some(id) = id {
                        sink.send(&response(id, Value::Null));
                    }
                }
                None => {
                    if let Some(id) = id {
                        debug!(%method, "unsupported request");
                        sink.send(&error_response(id, METHOD_NOT_FOUND, "method not found"));
                    } else if method.is_empty() {
                        warn!("ignoring host message without a method");
                    }
                }
            },
        }
    }

    session.shutdown().await;
    info!("bridge stopped");
}

fn handle(
    session: &mut RoastSession,
    event: HostEvent,
    config_path: &Path,
    notices: &dyn OutputSink,
) {
    match event {
        HostEvent::DiagnosticsPublished { uri, diagnostics } => {
            session.publish_diagnostics(&uri, diagnostics)
        }
        HostEvent::DocumentOpened {
            uri,
            language_id,
            text,
        } => session.did_open(&uri, &language_id, &text),
        HostEvent::DocumentChanged { uri, text } => session.did_change(&uri, text.as_deref()),
        HostEvent::DocumentClosed { uri } => session.did_close(&uri),
        HostEvent::CursorMoved { uri, line } => {
            session.cursor_moved(&uri, line);
        }
        HostEvent::Command(command) => run_command(session, command, config_path, notices),
        HostEvent::Exit => {}
    }
}

fn run_command(
    session: &mut RoastSession,
    command: HostCommand,
    config_path: &Path,
    notices: &dyn OutputSink,
) {
    let command = match command {
        HostCommand::TriggerRoast { uri, line } => {
            session.trigger_roast(uri.as_deref(), line);
            return;
        }
        HostCommand::Toggle => RoastCommand::Toggle,
        HostCommand::SetApiKey(key) => RoastCommand::SetApiKey(key),
        HostCommand::SetCooldown(input) => RoastCommand::SetCooldown(input),
    };

    // Rejections are already reported to the host by the session.
    let Ok(result) = session.execute(command) else {
        return;
    };
    if let Err(err) = persist(config_path, &result, session.config()) {
        warn!(error = %err, "could not save config");
        notices.notify(
            NoticeLevel::Error,
            &format!("RageLang: could not save settings: {err}"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragelang_lsp::{notification, write_lsp_message};
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_read_loop_skips_malformed_frames() {
        let mut input = Vec::new();
        write_lsp_message(&mut input, &notification("a", json!({}))).unwrap();
        input.extend_from_slice(b"Content-Length: 5\r\n\r\nnope!");
        write_lsp_message(&mut input, &notification("b", json!({}))).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        read_loop(Cursor::new(input), tx);

        assert_eq!(rx.try_recv().unwrap()["method"], "a");
        assert_eq!(rx.try_recv().unwrap()["method"], "b");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_read_loop_survives_huge_content_length() {
        let mut input = Vec::new();
        write_lsp_message(&mut input, &notification("a", json!({}))).unwrap();
        input.extend_from_slice(b"Content-Length: 18446744073709551000\r\n\r\n{}");

        let (tx, mut rx) = mpsc::unbounded_channel();
        read_loop(Cursor::new(input), tx);

        assert_eq!(rx.try_recv().unwrap()["method"], "a");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_read_loop_stops_without_content_length() {
        let mut input = b"Content-Type: x\r\n\r\n{}".to_vec();
        write_lsp_message(&mut input, &notification("b", json!({}))).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        read_loop(Cursor::new(input), tx);

        assert!(rx.try_recv().is_err());
    }
}
