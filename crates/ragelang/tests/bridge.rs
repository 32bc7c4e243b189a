use ragelang_lsp::{notification, read_lsp_message, write_lsp_message};
use serde_json::{Value, json};
use std::io::{BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

const URI: &str = "file:///work/main.rs";
const TIMEOUT: Duration = Duration::from_secs(20);

struct Bridge {
    child: Child,
    stdin: Option<ChildStdin>,
    messages: Receiver<Value>,
    _dir: tempfile::TempDir,
}

impl Bridge {
    fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut child = Command::new(env!("CARGO_BIN_EXE_ragelang"))
            .arg("--config")
            .arg(dir.path().join("config.toml"))
            .arg("serve")
            .env_remove("RAGELANG_API_KEY")
            .env_remove("RAGELANG_LOG_PATH")
            .env("RAGELANG_LOG", "off")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn ragelang serve");

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().unwrap();
        let (tx, messages) = mpsc::channel();
        std::thread::spawn(move || {
            let mut reader = BufReader::new(stdout);
            while let Ok(Some(message)) = read_lsp_message(&mut reader) {
                if tx.send(message).is_err() {
                    break;
                }
            }
        });

        Self {
            child,
            stdin,
            messages,
            _dir: dir,
        }
    }

    fn send(&mut self, message: Value) {
        let stdin = self.stdin.as_mut().unwrap();
        write_lsp_message(stdin, &message).unwrap();
        stdin.flush().unwrap();
    }

    fn notify(&mut self, method: &str, params: Value) {
        self.send(notification(method, params));
    }

    fn wait_for(&self, method: &str) -> Value {
        loop {
            let message = self
                .messages
                .recv_timeout(TIMEOUT)
                .unwrap_or_else(|_| panic!("no {method} from bridge"));
            if message["method"] == method {
                return message;
            }
        }
    }

    fn exit(mut self) -> Vec<Value> {
        self.notify("exit", Value::Null);
        self.stdin.take();
        let status = self.child.wait().unwrap();
        assert!(status.success());
        self.messages.iter().collect()
    }
}

fn open_main(bridge: &mut Bridge) {
    bridge.notify(
        "textDocument/didOpen",
        json!({ "textDocument": { "uri": URI, "languageId": "rust", "version": 1,
            "text": "fn main() {\n    let y = x;\n}\n" } }),
    );
}

#[test]
fn test_initialize_and_no_key_warning() {
    let mut bridge = Bridge::start();
    let warning = bridge.wait_for("window/showMessage");
    assert_eq!(warning["params"]["type"], 2);

    bridge.send(json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }));
    let reply = bridge
        .messages
        .recv_timeout(TIMEOUT)
        .expect("initialize reply");
    assert_eq!(reply["id"], 1);
    let commands = &reply["result"]["capabilities"]["executeCommandProvider"]["commands"];
    assert!(commands.as_array().unwrap().contains(&json!("ragelang.triggerRoast")));

    bridge.send(json!({ "jsonrpc": "2.0", "id": 2, "method": "textDocument/hover", "params": {} }));
    let reply = bridge.messages.recv_timeout(TIMEOUT).expect("error reply");
    assert_eq!(reply["id"], 2);
    assert_eq!(reply["error"]["code"], -32601);

    bridge.exit();
}

#[test]
fn test_leaving_errored_line_shows_ghost_comment() {
    let mut bridge = Bridge::start();
    open_main(&mut bridge);
    bridge.notify("ragelang/cursorMoved", json!({ "uri": URI, "line": 1 }));
    bridge.notify(
        "textDocument/publishDiagnostics",
        json!({ "uri": URI, "diagnostics": [ {
            "range": { "start": { "line": 1, "character": 12 }, "end": { "line": 1, "character": 13 } },
            "severity": 1,
            "message": "cannot find value `x` in this scope"
        } ] }),
    );
    bridge.notify("ragelang/cursorMoved", json!({ "uri": URI, "line": 2 }));

    let art = bridge.wait_for("ragelang/output");
    assert!(art["params"]["text"].as_str().unwrap().contains("- Compiler"));

    let ghost = bridge.wait_for("ragelang/ghostComment");
    let params = &ghost["params"];
    assert_eq!(params["uri"], URI);
    assert_eq!(params["line"], 1);
    assert_eq!(params["column"], 14);
    assert_eq!(params["durationMs"], 5000);
    assert!(params["text"].as_str().unwrap().starts_with("// 🔥"));

    // Ending the session clears what is still shown.
    let rest = bridge.exit();
    assert!(
        rest.iter()
            .any(|m| m["method"] == "ragelang/clearGhostComment" && m["params"]["text"] == params["text"])
    );
}

#[test]
fn test_execute_command_roasts_and_rejects_bad_cooldown() {
    let mut bridge = Bridge::start();
    open_main(&mut bridge);
    bridge.notify("ragelang/cursorMoved", json!({ "uri": URI, "line": 0 }));
    bridge.send(json!({
        "jsonrpc": "2.0", "id": 7, "method": "workspace/executeCommand",
        "params": { "command": "ragelang.triggerRoast", "arguments": [] }
    }));
    let ghost = bridge.wait_for("ragelang/ghostComment");
    assert_eq!(ghost["params"]["line"], 0);

    bridge.notify(
        "workspace/executeCommand",
        json!({ "command": "ragelang.setCooldown", "arguments": ["later"] }),
    );
    loop {
        let message = bridge.wait_for("window/showMessage");
        if message["params"]["type"] == 1 {
            assert_eq!(
                message["params"]["message"],
                "Please enter a valid number of seconds"
            );
            break;
        }
    }

    bridge.exit();
}
