//! JSON-RPC/LSP stdio framing helpers.
//!
//! Messages are JSON values framed by HTTP-like headers:
//!
//! ```text
//! Content-Length: <n>\r\n
//! \r\n
//! <n bytes of UTF-8 JSON>
//! ```

use serde_json::{Value, json};
use std::io::{self, BufRead, Read, Write};

/// Build a JSON-RPC 2.0 notification.
pub fn notification(method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
    })
}

/// Build a JSON-RPC 2.0 success response.
pub fn response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// `MethodNotFound` error code.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Build a JSON-RPC 2.0 error response.
pub fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    })
}

/// Write a single framed JSON-RPC message to `writer` and flush it.
pub fn write_lsp_message<W: Write>(writer: &mut W, value: &Value) -> io::Result<()> {
    let body =
        serde_json::to_vec(value).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
    writer.write_all(&body)?;
    writer.flush()
}

/// Largest message body accepted from the host.
pub const MAX_MESSAGE_LEN: usize = 64 * 1024 * 1024;

/// Read a single framed JSON-RPC message from `reader`.
///
/// Returns `Ok(None)` on clean EOF before any header. Headers other than `Content-Length`
/// (e.g. `Content-Type`) are ignored.
///
/// A body that is not valid JSON, or one longer than [`MAX_MESSAGE_LEN`], is consumed and
/// reported as [`io::ErrorKind::InvalidData`]; the stream stays in sync for the next read.
/// Without a usable `Content-Length` the body boundary is unknown, so that case is reported as
/// [`io::ErrorKind::InvalidInput`] and the stream must not be read further.
pub fn read_lsp_message<R: BufRead>(reader: &mut R) -> io::Result<Option<Value>> {
    read_bounded(reader, MAX_MESSAGE_LEN)
}

fn read_bounded<R: BufRead>(reader: &mut R, max_len: usize) -> io::Result<Option<Value>> {
    let mut content_length: Option<u64> = None;
    let mut saw_header = false;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            if saw_header {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "EOF inside message headers",
                ));
            }
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            if saw_header {
                break;
            }
            // Tolerate blank lines between messages.
            continue;
        }
        saw_header = true;

        if let Some((name, rest)) = trimmed.split_once(':')
            && name.trim().eq_ignore_ascii_case("Content-Length")
        {
            content_length = rest.trim().parse::<u64>().ok();
        }
    }

    let len = content_length.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "missing Content-Length header, message stream out of sync",
        )
    })?;

    if len > max_len as u64 {
        let skipped = io::copy(&mut (&mut *reader).take(len), &mut io::sink())?;
        if skipped < len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "EOF inside oversized message body",
            ));
        }
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("message of {len} bytes exceeds the {max_len} byte limit"),
        ));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body)?;

    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
